//! # Device mood.
//!
//! A smart toaster's [`Mood`] stretches or shrinks the time a job takes.
//! The multiplier is read once when a job starts:
//!
//! | Mood       | Multiplier |
//! |------------|------------|
//! | `Grumpy`   | 1.25       |
//! | `Lazy`     | 1.5        |
//! | `Cheerful` | 0.85       |
//!
//! Effective steps are `ceil(base * multiplier)`, computed in integer percent
//! so the rounding is exact.

use std::fmt;

/// Behavioral state of a smart toaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Mood {
    /// Slow and reluctant (x1.25).
    Grumpy = 0,
    /// Eager (x0.85). Initial mood.
    #[default]
    Cheerful = 1,
    /// Very slow (x1.5).
    Lazy = 2,
}

impl Mood {
    /// The full mood set, in declaration order.
    pub const ALL: [Mood; 3] = [Mood::Grumpy, Mood::Cheerful, Mood::Lazy];

    /// Duration multiplier in percent.
    #[inline]
    pub fn percent(self) -> u64 {
        match self {
            Mood::Grumpy => 125,
            Mood::Lazy => 150,
            Mood::Cheerful => 85,
        }
    }

    /// Returns `ceil(base * percent / 100)`.
    pub fn scaled_steps(self, base: u32) -> u32 {
        let scaled = (u64::from(base) * self.percent()).div_ceil(100);
        scaled.min(u64::from(u32::MAX)) as u32
    }

    pub(crate) fn from_u8(raw: u8) -> Mood {
        match raw {
            0 => Mood::Grumpy,
            2 => Mood::Lazy,
            _ => Mood::Cheerful,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mood::Grumpy => "GRUMPY",
            Mood::Cheerful => "CHEERFUL",
            Mood::Lazy => "LAZY",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grumpy_scaling() {
        assert_eq!(Mood::Grumpy.scaled_steps(1), 2);
        assert_eq!(Mood::Grumpy.scaled_steps(4), 5);
        assert_eq!(Mood::Grumpy.scaled_steps(10), 13);
    }

    #[test]
    fn test_lazy_scaling() {
        assert_eq!(Mood::Lazy.scaled_steps(1), 2);
        assert_eq!(Mood::Lazy.scaled_steps(2), 3);
        assert_eq!(Mood::Lazy.scaled_steps(3), 5);
    }

    #[test]
    fn test_cheerful_scaling() {
        assert_eq!(Mood::Cheerful.scaled_steps(1), 1);
        assert_eq!(Mood::Cheerful.scaled_steps(2), 2);
        assert_eq!(Mood::Cheerful.scaled_steps(10), 9);
        assert_eq!(Mood::Cheerful.scaled_steps(20), 17);
    }

    #[test]
    fn test_roundtrip_raw() {
        for m in Mood::ALL {
            assert_eq!(Mood::from_u8(m as u8), m);
        }
    }

    #[test]
    fn test_default_is_cheerful() {
        assert_eq!(Mood::default(), Mood::Cheerful);
        assert_eq!(Mood::default().to_string(), "CHEERFUL");
    }
}
