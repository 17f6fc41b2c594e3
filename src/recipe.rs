//! # Toast recipes.
//!
//! A [`Recipe`] describes one unit of simulated work: a name, a browning level
//! and a base duration. Out-of-range input is silently normalized at
//! construction time:
//! - `level` is clamped into `[1, 10]`;
//! - `duration_seconds` is clamped to a minimum of `1`.
//!
//! Recipes are immutable and cheap to clone (the name is `Arc<str>`), so they
//! are moved into a device mailbox by value.
//!
//! ## Example
//! ```rust
//! use toastnet::Recipe;
//!
//! let r = Recipe::new("Sourdough", 15, 0);
//! assert_eq!(r.level(), 10);
//! assert_eq!(r.duration_seconds(), 1);
//! assert_eq!(r.to_string(), "Sourdough (lvl 10, 1s)");
//! ```

use std::fmt;
use std::sync::Arc;

/// Lowest accepted browning level.
pub const MIN_LEVEL: u8 = 1;
/// Highest accepted browning level.
pub const MAX_LEVEL: u8 = 10;

/// Immutable description of a toasting job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipe {
    name: Arc<str>,
    level: u8,
    duration_seconds: u32,
}

impl Recipe {
    /// Creates a recipe, clamping `level` into `[1, 10]` and `duration_seconds` to `>= 1`.
    pub fn new(name: impl Into<Arc<str>>, level: i64, duration_seconds: i64) -> Self {
        let level = level.clamp(i64::from(MIN_LEVEL), i64::from(MAX_LEVEL)) as u8;
        let duration_seconds = duration_seconds.clamp(1, i64::from(u32::MAX)) as u32;
        Self {
            name: name.into(),
            level,
            duration_seconds,
        }
    }

    /// Returns the recipe name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the browning level (`1..=10`).
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Returns the base duration in seconds (`>= 1`).
    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (lvl {}, {}s)",
            self.name, self.level, self.duration_seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_clamped_high() {
        assert_eq!(Recipe::new("bagel", 15, 3).level(), 10);
    }

    #[test]
    fn test_level_clamped_low() {
        assert_eq!(Recipe::new("bagel", 0, 3).level(), 1);
        assert_eq!(Recipe::new("bagel", -7, 3).level(), 1);
    }

    #[test]
    fn test_duration_clamped_to_one() {
        assert_eq!(Recipe::new("rye", 5, 0).duration_seconds(), 1);
        assert_eq!(Recipe::new("rye", 5, -10).duration_seconds(), 1);
    }

    #[test]
    fn test_in_range_values_untouched() {
        let r = Recipe::new("brioche", 7, 4);
        assert_eq!(r.name(), "brioche");
        assert_eq!(r.level(), 7);
        assert_eq!(r.duration_seconds(), 4);
    }

    #[test]
    fn test_clamping_holds_for_any_input() {
        for level in [-100, -1, 0, 1, 5, 10, 11, 1000] {
            for duration in [-5, 0, 1, 2, 60] {
                let r = Recipe::new("x", level, duration);
                assert!((MIN_LEVEL..=MAX_LEVEL).contains(&r.level()));
                assert!(r.duration_seconds() >= 1);
            }
        }
    }

    #[test]
    fn test_display() {
        let r = Recipe::new("Sourdough", 5, 3);
        assert_eq!(r.to_string(), "Sourdough (lvl 5, 3s)");
    }
}
