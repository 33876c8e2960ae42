use axum::{Extension, Json, http::StatusCode};
use chrono::Utc;
use serde_json::{Value, json};

use crate::app::AppState;
use crate::error::AppError;

/// `GET /` banner.
pub async fn root() -> (StatusCode, Json<Value>) {
    let body = json!({
        "status": "success",
        "message": "Resort Booking API is running",
        "timestamp": Utc::now().to_rfc3339(),
    });
    (StatusCode::OK, Json(body))
}

/// `GET /health`: always 200, with the storage connection status in the body.
pub async fn health(Extension(state): Extension<AppState>) -> (StatusCode, Json<Value>) {
    let connected = state.bookings.ping().await;
    if !connected {
        tracing::warn!("health check: storage backend unreachable");
    }

    let database = if connected { "connected" } else { "disconnected" };
    let body = json!({
        "status": "ok",
        "database": database,
        "timestamp": Utc::now().to_rfc3339(),
    });
    (StatusCode::OK, Json(body))
}

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
