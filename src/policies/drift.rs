//! # Mood drift policy.
//!
//! [`MoodDrift`] models behavioral drift independent of job execution: on
//! every worker-loop iteration the device rolls once, and with probability
//! `percent / 100` its mood is replaced by a uniformly random member of
//! [`Mood::ALL`] (which may be the current mood).
//!
//! The random source is supplied by the caller so drift is reproducible with a
//! seeded generator.
//!
//! # Example
//! ```rust
//! use rand::{SeedableRng, rngs::StdRng};
//! use toastnet::{Mood, MoodDrift};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let always = MoodDrift { percent: 100 };
//! assert!(always.roll(&mut rng).is_some());
//!
//! let never = MoodDrift::disabled();
//! assert_eq!(never.roll(&mut rng), None::<Mood>);
//! ```

use rand::Rng;

use crate::devices::Mood;

/// Per-iteration chance of a random mood change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoodDrift {
    /// Chance in percent (`0` = never, `>= 100` = every iteration).
    pub percent: u8,
}

impl Default for MoodDrift {
    /// Returns a 5% drift chance.
    fn default() -> Self {
        Self { percent: 5 }
    }
}

impl MoodDrift {
    /// Drift that never fires.
    pub const fn disabled() -> Self {
        Self { percent: 0 }
    }

    /// Rolls once; returns the new mood when drift fires.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Mood> {
        if rng.random_range(0..100u8) >= self.percent {
            return None;
        }
        let idx = rng.random_range(0..Mood::ALL.len());
        Some(Mood::ALL[idx])
    }
}
