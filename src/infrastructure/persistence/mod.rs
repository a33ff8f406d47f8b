//! Alias store implementations.
//!
//! - [`PgAliasRepository`] - PostgreSQL storage via SQLx
//! - [`MemoryAliasRepository`] - Process-local storage for tests and local runs

pub mod db_error;
pub mod memory_alias_repository;
pub mod pg_alias_repository;

pub use memory_alias_repository::MemoryAliasRepository;
pub use pg_alias_repository::PgAliasRepository;
