use serde::Serialize;

/// Discriminator carried by every envelope.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// A single field-addressable validation failure.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    /// Convenience constructor when you have a concrete `T` value
    pub fn success_with_data(message: &str, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.to_string(),
            data: Some(data),
            errors: None,
        }
    }

    /// Error envelope without field details
    pub fn error(message: &str) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.to_string(),
            data: None,
            errors: None,
        }
    }

    /// Error constructor that includes field-level validation errors
    pub fn error_with_fields(message: &str, errors: Vec<FieldError>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.to_string(),
            data: None,
            errors: Some(errors),
        }
    }
}
