//! Handler for alias creation.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_host::extract_host_from_headers;

/// Returns the short URL for a destination, creating the alias on first use.
///
/// # Endpoint
///
/// `POST /short`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/a" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "original_url": "https://example.com/a",
///   "short_url": "http://localhost:8080/1714564800aZ3k"
/// }
/// ```
///
/// The short URL base is `BASE_URL` when configured, otherwise
/// `http://<Host header>`.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails or no base can be determined.
/// Returns 500 Internal Server Error if the alias could not be stored.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let base = match &state.base_url {
        Some(base) => base.clone(),
        None => format!("http://{}", extract_host_from_headers(&headers)?),
    };

    let created = state
        .alias_service
        .create_alias(&payload.original_url)
        .await?;

    Ok(Json(ShortenResponse {
        short_url: state.alias_service.short_url(&base, &created.code),
        original_url: payload.original_url,
    }))
}
