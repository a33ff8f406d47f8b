//! Landing page for stale links.

use axum::Json;

use crate::api::dto::message::MessageResponse;

/// Returns the same message an expired code gets.
///
/// # Endpoint
///
/// `GET /timeout`
pub async fn timeout_handler() -> Json<MessageResponse> {
    Json(MessageResponse::expired())
}
