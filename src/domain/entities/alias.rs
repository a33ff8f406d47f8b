//! Alias entity representing a time-limited short code.

use chrono::{DateTime, Duration, Utc};

/// How long an alias stays resolvable after creation.
///
/// Expired aliases are kept in the store; they still block their code and
/// still dedupe their original URL.
pub const ALIAS_TTL: Duration = Duration::seconds(86_400);

/// A stored mapping from a short code to its original URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl Alias {
    /// Creates a new Alias instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            created_at,
        }
    }

    /// Earliest instant at which the alias no longer resolves.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + ALIAS_TTL
    }

    /// Returns true while `now - created_at < ALIAS_TTL`.
    pub fn is_resolvable_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at()
    }
}

/// Input data for inserting a new alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlias {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}
