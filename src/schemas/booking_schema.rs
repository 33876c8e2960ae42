use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Canonical email pattern shared by request validation and the store.
pub static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is a valid regex"));

/// Request schema for `POST /bookings`.
///
/// Fields are optional here so that presence and type problems can be reported per
/// field while the untyped body is lifted into this struct; the rules below run on
/// whatever was present.
#[derive(Debug, Default, Validate)]
pub struct CreateBookingSchema {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,

    #[validate(regex(path = *EMAIL_PATTERN, message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: Option<String>,

    pub check_in_date: Option<String>,

    pub check_out_date: Option<String>,

    #[validate(range(min = 1, message = "Number of guests must be a positive integer"))]
    pub guests: Option<i64>,

    pub message: Option<String>,
}

/// A booking submission that passed request validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedBooking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub guests: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
