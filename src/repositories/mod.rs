use async_trait::async_trait;
use thiserror::Error;

use crate::error::AppError;
use crate::models::booking::Booking;
use crate::schemas::booking_schema::ValidatedBooking;

pub mod memory_booking_repository;
pub mod mysql_booking_repository;

pub use memory_booking_repository::MemoryBookingRepository;
pub use mysql_booking_repository::MySqlBookingRepository;

/// Failures a booking store can report, already classified for the caller.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("identifier is not a valid booking id")]
    InvalidId,

    #[error("{0}")]
    Invalid(String),

    #[error("booking already exists")]
    Conflict,

    #[error("booking not found")]
    NotFound,

    #[error("failed to {action}: {source}")]
    Backend {
        action: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidId => AppError::BadInput("Invalid booking ID".to_string()),
            StoreError::Invalid(message) => AppError::BadInput(message),
            StoreError::Conflict => AppError::Conflict("Booking already exists".to_string()),
            StoreError::NotFound => AppError::NotFound("Booking not found".to_string()),
            StoreError::Backend { action, source } => {
                tracing::error!(error.message = %source, "failed to {action}");
                AppError::Internal(format!("Failed to {action}"))
            }
        }
    }
}

/// Durable storage for bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Normalize, check and persist a new booking, returning it with its generated id.
    async fn create(&self, input: ValidatedBooking) -> Result<Booking, StoreError>;

    /// All bookings, most recently created first.
    async fn list(&self) -> Result<Vec<Booking>, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Whether the backend is currently reachable.
    async fn ping(&self) -> bool;
}
