//! Repository trait definitions for the domain layer.
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod alias_repository;

pub use alias_repository::{AliasRepository, Insertion, StoreError};

#[cfg(test)]
pub use alias_repository::MockAliasRepository;
