//! Alias creation and resolution service.

use std::sync::Arc;

use chrono::SubsecRound;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::NewAlias;
use crate::domain::repositories::{AliasRepository, Insertion, StoreError};
use crate::utils::code_generator::CodeGenerator;

/// Default number of codes tried before giving up on a creation.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Errors surfaced by [`AliasService`].
#[derive(Debug, Error)]
pub enum AliasError {
    /// Every generated code was already taken.
    #[error("failed to generate a unique code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a successful creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAlias {
    pub original_url: String,
    pub code: String,
    /// True when the URL already had an alias and no row was written.
    pub reused: bool,
}

/// Result of a resolution.
///
/// Unknown and expired codes are deliberately indistinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    Expired,
}

/// Service for creating and resolving time-limited aliases.
///
/// Creation is idempotent per original URL: once a URL has an alias, that
/// alias is returned forever, even after it stops resolving.
pub struct AliasService<R: AliasRepository + ?Sized> {
    repository: Arc<R>,
    generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
    max_attempts: usize,
}

impl<R: AliasRepository + ?Sized> AliasService<R> {
    /// Creates a new alias service.
    pub fn new(
        repository: Arc<R>,
        generator: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            generator,
            clock,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides how many codes are tried per creation (at least one).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Returns the alias for `original_url`, creating it if the URL is new.
    ///
    /// # Code Generation
    ///
    /// - Asks the generator for a candidate and inserts it atomically unless a
    ///   concurrent request already aliased the same URL
    /// - Regenerates on code collisions, up to the configured attempt count
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::CodeSpaceExhausted`] if every attempt collided.
    /// Returns [`AliasError::Store`] on storage failures, without retrying.
    pub async fn create_alias(&self, original_url: &str) -> Result<CreatedAlias, AliasError> {
        if let Some(existing) = self.repository.find_by_original_url(original_url).await? {
            debug!(code = %existing.short_code, "Reusing existing alias");
            return Ok(CreatedAlias {
                original_url: existing.original_url,
                code: existing.short_code,
                reused: true,
            });
        }

        for attempt in 1..=self.max_attempts {
            let new_alias = NewAlias {
                original_url: original_url.to_string(),
                short_code: self.generator.generate(),
                // Microsecond precision, matching TIMESTAMPTZ.
                created_at: self.clock.now().trunc_subsecs(6),
            };

            match self.repository.insert_if_absent(new_alias).await {
                Ok(Insertion::Created(alias)) => {
                    info!(code = %alias.short_code, "Alias created");
                    return Ok(CreatedAlias {
                        original_url: alias.original_url,
                        code: alias.short_code,
                        reused: false,
                    });
                }
                Ok(Insertion::Existing(alias)) => {
                    debug!(code = %alias.short_code, "Concurrent creation won, reusing its alias");
                    return Ok(CreatedAlias {
                        original_url: alias.original_url,
                        code: alias.short_code,
                        reused: true,
                    });
                }
                Err(StoreError::UniqueViolation { code }) => {
                    warn!(%code, attempt, "Short code collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AliasError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Looks up the destination of a code that has not yet expired.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::Store`] on storage failures.
    pub async fn resolve_alias(&self, code: &str) -> Result<Resolution, AliasError> {
        let now = self.clock.now();

        let resolution = match self.repository.find_active_by_code(code, now).await? {
            Some(alias) => Resolution::Found(alias.original_url),
            None => Resolution::Expired,
        };

        Ok(resolution)
    }

    /// Joins a base URL and a code into a full short URL.
    pub fn short_url(&self, base: &str, code: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), code)
    }

    /// Returns true if the underlying store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.repository.health_check().await
    }
}
