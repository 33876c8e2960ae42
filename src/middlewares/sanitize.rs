use axum::{
    body::{Body, Bytes, to_bytes},
    extract::Request,
    http::header::{CONTENT_LENGTH, HeaderValue},
    middleware::Next,
    response::Response,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::AppError;

/// Largest JSON body the sanitizer will buffer.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex"));

/// Trim every top-level string of a JSON object and strip `<...>` substrings from it.
/// Non-object values are left untouched.
pub fn sanitize_fields(body: &mut Value) {
    let Some(map) = body.as_object_mut() else {
        return;
    };
    for value in map.values_mut() {
        if let Value::String(s) = value {
            let trimmed = s.trim();
            *s = TAG_PATTERN.replace_all(trimmed, "").into_owned();
        }
    }
}

/// Middleware rewriting JSON object bodies through `sanitize_fields` before handlers see them.
///
/// The Content-Type header is not consulted: any body that parses as a JSON object is
/// rewritten, so every media type the `Json` extractor accepts arrives sanitized.
pub async fn sanitize_json_body(req: Request, next: Next) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::BadInput(format!("Failed to read request body: {e}")))?;

    // Unparseable bodies pass through so the handler's extractor reports them.
    let bytes = match serde_json::from_slice::<Value>(&bytes) {
        Ok(mut value) if value.is_object() => {
            sanitize_fields(&mut value);
            let rewritten = serde_json::to_vec(&value)
                .map_err(|e| AppError::Internal(format!("Failed to re-encode request body: {e}")))?;
            parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(rewritten.len()));
            Bytes::from(rewritten)
        }
        _ => bytes,
    };

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
