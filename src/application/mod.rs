//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a transport-agnostic API
//! for HTTP handlers and the admin CLI.
//!
//! - [`services::alias_service::AliasService`] - Alias creation and resolution

pub mod services;
