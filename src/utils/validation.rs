use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use crate::error::AppError;
use crate::models::booking::parse_booking_date;
use crate::schemas::booking_schema::{CreateBookingSchema, ValidatedBooking};
use crate::utils::response::FieldError;

/// Order in which field errors are reported.
const FIELD_ORDER: [&str; 7] = [
    "name",
    "email",
    "phone",
    "checkInDate",
    "checkOutDate",
    "guests",
    "message",
];

/// Validate an untyped booking submission.
///
/// Every per-field problem is collected. The check-out/check-in ordering is only
/// evaluated once all fields are individually valid, and is reported on `checkOutDate`.
pub fn validate_booking(body: &Value) -> Result<ValidatedBooking, AppError> {
    let Some(map) = body.as_object() else {
        return Err(AppError::BadInput("Request body must be a JSON object".to_string()));
    };

    let mut errors = Vec::new();
    let schema = CreateBookingSchema {
        name: required_string(map, "name", &mut errors),
        email: required_string(map, "email", &mut errors),
        phone: required_string(map, "phone", &mut errors),
        check_in_date: required_string(map, "checkInDate", &mut errors),
        check_out_date: required_string(map, "checkOutDate", &mut errors),
        guests: required_integer(map, "guests", &mut errors),
        message: optional_string(map, "message", &mut errors),
    };

    if let Err(rule_errors) = schema.validate() {
        errors.extend(rule_field_errors(&rule_errors));
    }

    let check_in = schema
        .check_in_date
        .as_deref()
        .map(|raw| parse_date_field(raw, "checkInDate", "Invalid check-in date", &mut errors));
    let check_out = schema
        .check_out_date
        .as_deref()
        .map(|raw| parse_date_field(raw, "checkOutDate", "Invalid check-out date", &mut errors));

    let CreateBookingSchema {
        name,
        email,
        phone,
        check_in_date,
        check_out_date,
        guests,
        message,
    } = schema;

    match (name, email, phone, check_in_date, check_out_date, guests) {
        (Some(name), Some(email), Some(phone), Some(check_in_date), Some(check_out_date), Some(guests))
            if errors.is_empty() =>
        {
            if let (Some(Some(check_in)), Some(Some(check_out))) = (check_in, check_out) {
                if check_out <= check_in {
                    return Err(AppError::Validation(vec![FieldError::new(
                        "checkOutDate",
                        "Check-out date must be after check-in date",
                    )]));
                }
            }
            Ok(ValidatedBooking {
                name,
                email,
                phone,
                check_in_date,
                check_out_date,
                guests,
                message,
            })
        }
        _ => Err(AppError::Validation(in_field_order(errors))),
    }
}

fn in_field_order(mut errors: Vec<FieldError>) -> Vec<FieldError> {
    let rank = |field: &str| FIELD_ORDER.iter().position(|f| *f == field).unwrap_or(FIELD_ORDER.len());
    errors.sort_by_key(|e| rank(&e.field));
    errors
}

fn rule_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .clone()
                    .unwrap_or_else(|| "Invalid input".into())
                    .to_string();
                FieldError::new(field, message)
            })
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn required_string(map: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match map.get(field) {
        None => {
            errors.push(FieldError::new(field, "Required"));
            None
        }
        Some(value) => expect_string(value, field, errors),
    }
}

fn optional_string(map: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    map.get(field).and_then(|value| expect_string(value, field, errors))
}

fn expect_string(value: &Value, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        other => {
            errors.push(FieldError::new(
                field,
                format!("Expected string, received {}", kind_of(other)),
            ));
            None
        }
    }
}

fn required_integer(map: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<i64> {
    let number = match map.get(field) {
        None => {
            errors.push(FieldError::new(field, "Required"));
            return None;
        }
        Some(Value::Number(n)) => n,
        Some(other) => {
            errors.push(FieldError::new(
                field,
                format!("Expected number, received {}", kind_of(other)),
            ));
            return None;
        }
    };

    if let Some(i) = number.as_i64() {
        return Some(i);
    }
    // `2.0` is an integer as far as clients are concerned.
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(f as i64),
        _ if number.is_u64() => {
            errors.push(FieldError::new(field, "Number is too large"));
            None
        }
        _ => {
            errors.push(FieldError::new(field, "Expected integer, received float"));
            None
        }
    }
}

fn parse_date_field(
    raw: &str,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    let parsed = parse_booking_date(raw);
    if parsed.is_none() {
        errors.push(FieldError::new(field, message));
    }
    parsed
}
