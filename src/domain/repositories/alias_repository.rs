//! Repository trait for alias persistence.

use crate::domain::entities::{Alias, NewAlias};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failures reported by an alias store.
///
/// "Not found" is not an error here; lookups return `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The short code is already taken by another alias.
    #[error("short code `{code}` is already in use")]
    UniqueViolation { code: String },

    /// The backing store could not be reached or failed mid-operation.
    #[error("alias store unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of [`AliasRepository::insert_if_absent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// A new row was written.
    Created(Alias),
    /// The original URL already had an alias; nothing was written.
    Existing(Alias),
}

impl Insertion {
    pub fn into_alias(self) -> Alias {
        match self {
            Self::Created(alias) | Self::Existing(alias) => alias,
        }
    }
}

/// Repository interface for alias storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAliasRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryAliasRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasRepository: Send + Sync {
    /// Finds the alias for an original URL, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on storage failures.
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Alias>, StoreError>;

    /// Finds an alias by code, ignoring rows created at or before `now - ALIAS_TTL`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on storage failures.
    async fn find_active_by_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Alias>, StoreError>;

    /// Inserts a new alias.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the code already exists.
    /// Returns [`StoreError::Unavailable`] on storage failures.
    async fn insert(&self, new_alias: NewAlias) -> Result<Alias, StoreError>;

    /// Inserts a new alias unless one already exists for its original URL.
    ///
    /// The existence check and the insert happen atomically with respect to
    /// other calls for the same original URL.
    ///
    /// # Errors
    ///
    /// Same as [`AliasRepository::insert`].
    async fn insert_if_absent(&self, new_alias: NewAlias) -> Result<Insertion, StoreError>;

    /// Returns true if the store answers a trivial query.
    async fn health_check(&self) -> bool;
}
