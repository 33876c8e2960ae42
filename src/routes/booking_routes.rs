use axum::{
    Router, middleware,
    routing::{delete, get},
};

// Import booking handlers
use crate::handlers::booking_handler::{destroy, index, store};

// Import the request body sanitizer
use crate::middlewares::sanitize::sanitize_json_body;

pub fn booking_routes() -> Router {
    Router::new()
        .route("/bookings", get(index).post(store))
        .route("/bookings/{id}", delete(destroy))
        // Clean string fields before the handlers validate them
        .layer(middleware::from_fn(sanitize_json_body))
}
