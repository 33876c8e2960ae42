use axum::{Router, routing::get};

use crate::handlers::health_handler::{health, root};

pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
