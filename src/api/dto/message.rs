//! Informational response body.

use serde::Serialize;

/// Shown for codes that are unknown or past their lifetime.
pub const EXPIRED_MESSAGE: &str =
    "The link may have expired. Check that it was typed correctly or create a new one!";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn expired() -> Self {
        Self {
            message: EXPIRED_MESSAGE.to_string(),
        }
    }
}
