//! Business logic services for the application layer.

pub mod alias_service;

pub use alias_service::{AliasError, AliasService, CreatedAlias, DEFAULT_MAX_ATTEMPTS, Resolution};
