use axum::{
    Extension, Json,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::app::AppState;
use crate::error::AppError;
use crate::utils::handler::HandlerResult;
use crate::utils::response::ApiResponse;
use crate::utils::validation::validate_booking;

/// `POST /bookings`
pub async fn store(
    Extension(state): Extension<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult {
    let Json(body) = payload.map_err(|e| AppError::BadInput(e.body_text()))?;

    // Reject before touching storage
    let input = validate_booking(&body)?;

    let booking = state.bookings.create(input).await?;
    tracing::info!(booking.id = %booking.id, "booking created");

    let response = ApiResponse::success_with_data("Booking created successfully", json!({ "booking": booking }));
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /bookings`
pub async fn index(Extension(state): Extension<AppState>) -> HandlerResult {
    let bookings = state.bookings.list().await?;
    let count = bookings.len();

    let response = ApiResponse::success_with_data(
        "Bookings retrieved successfully",
        json!({ "bookings": bookings, "count": count }),
    );
    Ok((StatusCode::OK, Json(response)))
}

/// `DELETE /bookings/{id}`
pub async fn destroy(Extension(state): Extension<AppState>, Path(id): Path<String>) -> HandlerResult {
    state.bookings.delete(&id).await?;
    tracing::info!(booking.id = %id, "booking deleted");

    let response = ApiResponse::success_with_data("Booking deleted successfully", Value::Null);
    Ok((StatusCode::OK, Json(response)))
}
