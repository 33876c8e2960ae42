pub mod booking_routes;
pub mod health_routes;
