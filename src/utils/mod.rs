//! Utility functions for code generation and request handling.
//!
//! - [`code_generator`] - Short code generation
//! - [`extract_host`] - Public host extraction from HTTP headers

pub mod code_generator;
pub mod extract_host;
