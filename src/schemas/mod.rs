pub mod booking_schema;

pub use crate::schemas::booking_schema::{CreateBookingSchema, ValidatedBooking};
