//! DTOs for the alias creation endpoint.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Longest original URL accepted by the HTTP adapter, in characters.
pub const MAX_URL_LENGTH: u64 = 8192;

/// Request to create (or fetch) the alias of a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The destination to alias. Stored verbatim.
    #[validate(
        length(min = 1, max = MAX_URL_LENGTH),
        custom(function = "validate_redirect_target")
    )]
    pub original_url: String,
}

/// Rejects destinations that cannot be sent back as a `Location` header.
fn validate_redirect_target(url: &str) -> Result<(), ValidationError> {
    if HeaderValue::from_bytes(url.as_bytes()).is_err() {
        return Err(ValidationError::new("invalid_redirect_target")
            .with_message("URL contains characters not allowed in a Location header".into()));
    }
    Ok(())
}

/// Alias of a URL, rendered as a full short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
}
