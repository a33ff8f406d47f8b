//! Public host extraction from HTTP request headers.

use crate::AppError;
use axum::http::{HeaderMap, header};

/// Returns the `Host` header value, port included.
///
/// Short URLs are built as `http://<host>/<code>`, so the port the client used
/// must survive.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - The `Host` header is missing or empty
/// - The header value contains invalid UTF-8
pub fn extract_host_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?
        .trim();

    if host.is_empty() {
        return Err(AppError::bad_request(
            "Empty Host header",
            serde_json::json!({}),
        ));
    }

    Ok(host.to_string())
}
