use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repositories::StoreError;
use crate::schemas::booking_schema::{EMAIL_PATTERN, ValidatedBooking};

/// A persisted reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub guests: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A normalized booking that passed the storage-level schema and is ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub guests: i64,
    pub message: String,
}

impl NewBooking {
    /// Normalize a validated payload and enforce the storage schema, including
    /// the stay-order invariant, before anything is written.
    pub fn new(input: ValidatedBooking) -> Result<Self, StoreError> {
        let mut violations: Vec<String> = Vec::new();

        let name = input.name.trim().to_string();
        if name.chars().count() < 2 {
            violations.push("name: Name must be at least 2 characters".into());
        }

        let email = input.email.trim().to_lowercase();
        if !EMAIL_PATTERN.is_match(&email) {
            violations.push("email: Please provide a valid email address".into());
        }

        let phone = input.phone.trim().to_string();
        if phone.is_empty() {
            violations.push("phone: Phone number is required".into());
        }

        let check_in_date = parse_booking_date(&input.check_in_date);
        if check_in_date.is_none() {
            violations.push("checkInDate: Check-in date is required".into());
        }
        let check_out_date = parse_booking_date(&input.check_out_date);
        if check_out_date.is_none() {
            violations.push("checkOutDate: Check-out date is required".into());
        }

        if input.guests < 1 {
            violations.push("guests: Number of guests must be at least 1".into());
        }

        let (Some(check_in_date), Some(check_out_date), true) =
            (check_in_date, check_out_date, violations.is_empty())
        else {
            return Err(StoreError::Invalid(format!(
                "Booking validation failed: {}",
                violations.join(", ")
            )));
        };

        // Pre-save guard: holds even when the request validator was bypassed.
        if check_out_date <= check_in_date {
            return Err(StoreError::Invalid(
                "Check-out date must be after check-in date".to_string(),
            ));
        }

        Ok(Self {
            name,
            email,
            phone,
            check_in_date,
            check_out_date,
            guests: input.guests,
            message: input.message.map(|m| m.trim().to_string()).unwrap_or_default(),
        })
    }
}

/// Parse a booking date.
///
/// Accepts an RFC 3339 timestamp, a plain `YYYY-MM-DD` date (midnight UTC), or a
/// naive `YYYY-MM-DDTHH:MM[:SS]` date-time read as UTC.
pub fn parse_booking_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.and_utc())
}
