//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - Alias store implementations (PostgreSQL and in-memory)

pub mod persistence;
