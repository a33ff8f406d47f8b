//! Handler for short URL redirect.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use crate::api::dto::message::MessageResponse;
use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a live code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - **302 Found** with `Location` set to the original URL while the alias
///   is younger than its TTL
/// - **200 OK** with an informational message otherwise; unknown and expired
///   codes get the same answer
///
/// # Errors
///
/// Returns 500 Internal Server Error if the store fails or the stored
/// destination cannot be sent as a header.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.alias_service.resolve_alias(&code).await? {
        Resolution::Found(original_url) => {
            let location = HeaderValue::try_from(original_url).map_err(|e| {
                error!(%code, "Stored destination is not a valid header value: {}", e);
                AppError::internal("Failed to build redirect", json!({}))
            })?;

            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        Resolution::Expired => {
            debug!(%code, "Code unknown or expired");
            Ok(Json(MessageResponse::expired()).into_response())
        }
    }
}
