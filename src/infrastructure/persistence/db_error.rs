//! Translation of SQLx errors into store errors.

use crate::domain::repositories::StoreError;

/// Name of the unique constraint on `urls.short_url`.
pub const SHORT_URL_CONSTRAINT: &str = "urls_short_url_key";

pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_URL_CONSTRAINT))
}

/// Maps a failed write of `code` to a [`StoreError`].
pub fn map_insert_error(e: sqlx::Error, code: &str) -> StoreError {
    if is_unique_violation_on_code(&e) {
        StoreError::UniqueViolation {
            code: code.to_string(),
        }
    } else {
        map_sqlx_error(e)
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let err = map_insert_error(sqlx::Error::PoolTimedOut, "abc");
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation_on_code(&sqlx::Error::RowNotFound));
    }
}
