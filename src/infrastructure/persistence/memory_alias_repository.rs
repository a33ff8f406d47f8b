//! In-process implementation of the alias repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::{Alias, NewAlias};
use crate::domain::repositories::{AliasRepository, Insertion, StoreError};

#[derive(Default)]
struct Tables {
    rows: Vec<Alias>,
    by_code: HashMap<String, usize>,
    by_url: HashMap<String, usize>,
}

impl Tables {
    fn push(&mut self, new_alias: NewAlias) -> Result<Alias, StoreError> {
        if self.by_code.contains_key(&new_alias.short_code) {
            return Err(StoreError::UniqueViolation {
                code: new_alias.short_code,
            });
        }

        let index = self.rows.len();
        let alias = Alias::new(
            index as i64 + 1,
            new_alias.original_url,
            new_alias.short_code,
            new_alias.created_at,
        );

        self.by_code.insert(alias.short_code.clone(), index);
        self.by_url.entry(alias.original_url.clone()).or_insert(index);
        self.rows.push(alias.clone());

        Ok(alias)
    }
}

/// Alias store kept in process memory.
///
/// Mirrors the PostgreSQL schema: codes are unique, rows are never removed,
/// and `find_by_original_url` returns the oldest row for a URL. Availability
/// can be toggled to exercise outage handling.
pub struct MemoryAliasRepository {
    tables: RwLock<Tables>,
    available: AtomicBool,
}

impl MemoryAliasRepository {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulates the store going down (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored aliases, expired ones included.
    pub async fn len(&self) -> usize {
        self.tables.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "memory store marked unavailable".to_string(),
            ))
        }
    }
}

impl Default for MemoryAliasRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AliasRepository for MemoryAliasRepository {
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Alias>, StoreError> {
        self.ensure_available()?;
        let tables = self.tables.read().await;

        Ok(tables
            .by_url
            .get(original_url)
            .map(|&index| tables.rows[index].clone()))
    }

    async fn find_active_by_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Alias>, StoreError> {
        self.ensure_available()?;
        let tables = self.tables.read().await;

        Ok(tables
            .by_code
            .get(code)
            .map(|&index| &tables.rows[index])
            .filter(|alias| alias.is_resolvable_at(now))
            .cloned())
    }

    async fn insert(&self, new_alias: NewAlias) -> Result<Alias, StoreError> {
        self.ensure_available()?;
        self.tables.write().await.push(new_alias)
    }

    async fn insert_if_absent(&self, new_alias: NewAlias) -> Result<Insertion, StoreError> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;

        if let Some(&index) = tables.by_url.get(&new_alias.original_url) {
            return Ok(Insertion::Existing(tables.rows[index].clone()));
        }

        tables.push(new_alias).map(Insertion::Created)
    }

    async fn health_check(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ALIAS_TTL;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn new_alias(url: &str, code: &str) -> NewAlias {
        NewAlias {
            original_url: url.to_string(),
            short_code: code.to_string(),
            created_at: start(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_original_url() {
        let repo = MemoryAliasRepository::new();

        let alias = repo
            .insert(new_alias("https://example.com/a", "c1"))
            .await
            .unwrap();

        assert_eq!(alias.id, 1);
        let found = repo
            .find_by_original_url("https://example.com/a")
            .await
            .unwrap();
        assert_eq!(found, Some(alias));
    }

    #[tokio::test]
    async fn test_insert_duplicate_code() {
        let repo = MemoryAliasRepository::new();
        repo.insert(new_alias("https://example.com/a", "c1"))
            .await
            .unwrap();

        let result = repo.insert(new_alias("https://example.com/b", "c1")).await;

        assert_eq!(
            result,
            Err(StoreError::UniqueViolation {
                code: "c1".to_string()
            })
        );
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_active_by_code_respects_ttl() {
        let repo = MemoryAliasRepository::new();
        repo.insert(new_alias("https://example.com/a", "c1"))
            .await
            .unwrap();

        let just_before = start() + ALIAS_TTL - Duration::seconds(1);
        assert!(
            repo.find_active_by_code("c1", just_before)
                .await
                .unwrap()
                .is_some()
        );

        let at_ttl = start() + ALIAS_TTL;
        assert!(repo.find_active_by_code("c1", at_ttl).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_alias_still_dedupes_and_blocks_code() {
        let repo = MemoryAliasRepository::new();
        repo.insert(new_alias("https://example.com/a", "c1"))
            .await
            .unwrap();

        let found = repo
            .find_by_original_url("https://example.com/a")
            .await
            .unwrap();
        assert!(found.is_some());

        let mut late = new_alias("https://example.com/b", "c1");
        late.created_at = start() + Duration::days(10);
        assert!(matches!(
            repo.insert(late).await,
            Err(StoreError::UniqueViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_insert_if_absent_returns_existing() {
        let repo = MemoryAliasRepository::new();

        let first = repo
            .insert_if_absent(new_alias("https://example.com/a", "c1"))
            .await
            .unwrap();
        let second = repo
            .insert_if_absent(new_alias("https://example.com/a", "c2"))
            .await
            .unwrap();

        assert!(matches!(first, Insertion::Created(_)));
        assert_eq!(second, Insertion::Existing(first.into_alias()));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_operation() {
        let repo = MemoryAliasRepository::new();
        repo.set_available(false);

        assert!(!repo.health_check().await);
        assert!(matches!(
            repo.find_by_original_url("https://example.com").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            repo.insert(new_alias("https://example.com", "c1")).await,
            Err(StoreError::Unavailable(_))
        ));

        repo.set_available(true);
        assert!(repo.health_check().await);
        assert!(repo.is_empty().await);
    }
}
