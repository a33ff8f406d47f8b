//! Router configuration.
//!
//! # Route Structure
//!
//! - `POST /short`   - Create or fetch the alias of a URL
//! - `GET  /timeout` - Stale link message
//! - `GET  /health`  - Store health check
//! - `GET  /{code}`  - Alias redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler, timeout_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes with state applied, without path normalization.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/short", post(shorten_handler))
        .route("/timeout", get(timeout_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(routes(state))
}
