//! Short code generation.
//!
//! Codes are the decimal Unix timestamp (seconds) of the moment they were
//! minted, followed by a fixed-length random alphanumeric suffix.
//!
//! Two codes minted in different seconds never collide: with a fixed suffix
//! length, equal-length codes carry equal-length timestamps, and those differ.
//! Codes minted within the same second collide only if their suffixes do, and
//! the store's uniqueness constraint catches that case.

use std::sync::Arc;

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::domain::clock::Clock;

/// Default number of random characters appended to the timestamp.
pub const DEFAULT_SUFFIX_LENGTH: usize = 4;

/// Upper bound accepted for the random suffix length.
pub const MAX_SUFFIX_LENGTH: usize = 16;

/// Produces candidate short codes for new aliases.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Timestamp-based generator.
///
/// A `suffix_length` of `0` yields the bare seconds value, so every alias
/// created within the same second competes for the same code.
pub struct TimeCodeGenerator {
    clock: Arc<dyn Clock>,
    suffix_length: usize,
}

impl TimeCodeGenerator {
    pub fn new(clock: Arc<dyn Clock>, suffix_length: usize) -> Self {
        Self {
            clock,
            suffix_length: suffix_length.min(MAX_SUFFIX_LENGTH),
        }
    }
}

impl CodeGenerator for TimeCodeGenerator {
    fn generate(&self) -> String {
        let mut code = self.clock.now().timestamp().to_string();

        code.extend(
            rand::rng()
                .sample_iter(Alphanumeric)
                .take(self.suffix_length)
                .map(char::from),
        );

        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use chrono::{Duration, TimeZone, Utc};
    use std::collections::HashSet;

    fn clock_at(secs: i64) -> Arc<ManualClock> {
        Arc::new(ManualClock::new(Utc.timestamp_opt(secs, 0).unwrap()))
    }

    #[test]
    fn test_generate_without_suffix_is_unix_seconds() {
        let generator = TimeCodeGenerator::new(clock_at(1_700_000_000), 0);
        assert_eq!(generator.generate(), "1700000000");
    }

    #[test]
    fn test_generate_without_suffix_collides_within_second() {
        let generator = TimeCodeGenerator::new(clock_at(1_700_000_000), 0);
        assert_eq!(generator.generate(), generator.generate());
    }

    #[test]
    fn test_generate_has_timestamp_prefix_and_suffix() {
        let generator = TimeCodeGenerator::new(clock_at(1_700_000_000), DEFAULT_SUFFIX_LENGTH);
        let code = generator.generate();

        assert_eq!(code.len(), 10 + DEFAULT_SUFFIX_LENGTH);
        assert!(code.starts_with("1700000000"));
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_differs_across_seconds() {
        let clock = clock_at(1_700_000_000);
        let generator = TimeCodeGenerator::new(clock.clone(), 0);

        let first = generator.generate();
        clock.advance(Duration::seconds(1));
        let second = generator.generate();

        assert_ne!(first, second);
        assert!(second.parse::<i64>().unwrap() > first.parse::<i64>().unwrap());
    }

    #[test]
    fn test_generate_suffix_spreads_same_second() {
        let generator = TimeCodeGenerator::new(clock_at(1_700_000_000), 8);

        let codes: HashSet<String> = (0..500).map(|_| generator.generate()).collect();

        assert_eq!(codes.len(), 500);
    }

    #[test]
    fn test_suffix_length_is_capped() {
        let generator = TimeCodeGenerator::new(clock_at(1_700_000_000), 1_000);
        assert_eq!(generator.generate().len(), 10 + MAX_SUFFIX_LENGTH);
    }
}
