pub mod booking_handler;
pub mod health_handler;
