//! PostgreSQL implementation of the alias repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::db_error::{map_insert_error, map_sqlx_error};
use crate::domain::entities::{ALIAS_TTL, Alias, NewAlias};
use crate::domain::repositories::{AliasRepository, Insertion, StoreError};

const SELECT_COLUMNS: &str = "SELECT id, original_url, short_url, creation_date FROM urls";

#[derive(sqlx::FromRow)]
struct AliasRow {
    id: i64,
    original_url: String,
    short_url: String,
    creation_date: DateTime<Utc>,
}

impl From<AliasRow> for Alias {
    fn from(row: AliasRow) -> Self {
        Alias::new(row.id, row.original_url, row.short_url, row.creation_date)
    }
}

/// PostgreSQL repository for alias storage and retrieval.
///
/// Uses bound parameters throughout; the pool bounds concurrent work.
pub struct PgAliasRepository {
    pool: Arc<PgPool>,
}

impl PgAliasRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Finds an alias by code regardless of its age.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Alias>, StoreError> {
        let row = sqlx::query_as::<_, AliasRow>(&format!("{SELECT_COLUMNS} WHERE short_url = $1"))
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Alias::from))
    }

    /// Counts every stored alias, expired ones included.
    pub async fn count_all(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    /// Counts aliases still resolvable at `now`.
    pub async fn count_active(&self, now: DateTime<Utc>) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls WHERE creation_date > $1")
            .bind(now - ALIAS_TTL)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl AliasRepository for PgAliasRepository {
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Alias>, StoreError> {
        let row = sqlx::query_as::<_, AliasRow>(&format!(
            "{SELECT_COLUMNS} WHERE original_url = $1 ORDER BY id LIMIT 1"
        ))
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Alias::from))
    }

    async fn find_active_by_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Alias>, StoreError> {
        let row = sqlx::query_as::<_, AliasRow>(&format!(
            "{SELECT_COLUMNS} WHERE short_url = $1 AND creation_date > $2"
        ))
        .bind(code)
        .bind(now - ALIAS_TTL)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Alias::from))
    }

    async fn insert(&self, new_alias: NewAlias) -> Result<Alias, StoreError> {
        let row = sqlx::query_as::<_, AliasRow>(
            r#"
            INSERT INTO urls (original_url, short_url, creation_date)
            VALUES ($1, $2, $3)
            RETURNING id, original_url, short_url, creation_date
            "#,
        )
        .bind(&new_alias.original_url)
        .bind(&new_alias.short_code)
        .bind(new_alias.created_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_insert_error(e, &new_alias.short_code))?;

        Ok(row.into())
    }

    async fn insert_if_absent(&self, new_alias: NewAlias) -> Result<Insertion, StoreError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // Serialises creations of the same URL until commit.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(&new_alias.original_url)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let existing = sqlx::query_as::<_, AliasRow>(&format!(
            "{SELECT_COLUMNS} WHERE original_url = $1 ORDER BY id LIMIT 1"
        ))
        .bind(&new_alias.original_url)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if let Some(row) = existing {
            tx.commit().await.map_err(map_sqlx_error)?;
            return Ok(Insertion::Existing(row.into()));
        }

        let row = sqlx::query_as::<_, AliasRow>(
            r#"
            INSERT INTO urls (original_url, short_url, creation_date)
            VALUES ($1, $2, $3)
            RETURNING id, original_url, short_url, creation_date
            "#,
        )
        .bind(&new_alias.original_url)
        .bind(&new_alias.short_code)
        .bind(new_alias.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, &new_alias.short_code))?;

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(Insertion::Created(row.into()))
    }

    async fn health_check(&self) -> bool {
        match sqlx::query("SELECT 1").execute(self.pool.as_ref()).await {
            Ok(_) => true,
            Err(e) => {
                error!("Database health check failed: {}", e);
                false
            }
        }
    }
}
