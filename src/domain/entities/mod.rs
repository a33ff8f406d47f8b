//! Core domain entities.
//!
//! - [`Alias`] - A stored original URL ↔ short code mapping
//! - [`NewAlias`] - Input for inserting an alias

pub mod alias;

pub use alias::{ALIAS_TTL, Alias, NewAlias};
