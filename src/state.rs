//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::AliasService;
use crate::domain::repositories::AliasRepository;

/// Application state cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub alias_service: Arc<AliasService<dyn AliasRepository>>,
    /// Public base for short URLs; `None` derives it from the `Host` header.
    pub base_url: Option<String>,
}

impl AppState {
    pub fn new(
        alias_service: Arc<AliasService<dyn AliasRepository>>,
        base_url: Option<String>,
    ) -> Self {
        Self {
            alias_service,
            base_url,
        }
    }
}
