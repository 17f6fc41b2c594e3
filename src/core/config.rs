//! # Runtime configuration.
//!
//! Provides [`DeviceConfig`] (timing and thermal constants of one smart toaster)
//! and [`NetworkConfig`] (settings for a [`ToasterNetwork`](crate::ToasterNetwork)).
//!
//! ## Sentinel values
//! - `poll_interval = 0s` → clamped to 1ms (the loop must still yield)
//! - `bus_capacity = 0` → clamped to 1
//! - `seed = None` → drift RNG seeded from OS entropy

use std::time::Duration;

use crate::policies::MoodDrift;

/// Settings for one smart toaster.
///
/// ## Field semantics
/// - `poll_interval`: how long the worker waits on an empty mailbox before drifting/re-checking stop
/// - `step_duration`: real time slept per simulated heating step
/// - `heat_step`: °C added per step
/// - `cooldown`: °C removed after a successful job (no floor)
/// - `overheat_threshold`: a step aborts when temperature is strictly above this
/// - `initial_temperature`, `initial_bread`: state at construction
/// - `drift`: per-iteration mood drift chance
/// - `seed`: optional seed for the drift RNG
#[derive(Clone, Debug)]
pub struct DeviceConfig {
    /// Bounded mailbox wait per loop iteration.
    pub poll_interval: Duration,
    /// Real-time length of one simulated step.
    pub step_duration: Duration,
    /// Temperature increase per step (°C).
    pub heat_step: i32,
    /// Temperature decrease after a finished job (°C).
    pub cooldown: i32,
    /// Overheat threshold (°C, exclusive).
    pub overheat_threshold: i32,
    /// Temperature at construction (°C).
    pub initial_temperature: i32,
    /// Bread at construction.
    pub initial_bread: u32,
    /// Mood drift chance.
    pub drift: MoodDrift,
    /// Drift RNG seed (`None` = OS entropy).
    pub seed: Option<u64>,
}

impl DeviceConfig {
    /// Returns the poll interval clamped to a minimum of 1ms.
    #[inline]
    pub fn poll_interval_clamped(&self) -> Duration {
        self.poll_interval.max(Duration::from_millis(1))
    }
}

impl Default for DeviceConfig {
    /// Default configuration:
    ///
    /// - `poll_interval = 1s`
    /// - `step_duration = 500ms`
    /// - `heat_step = 2`, `cooldown = 30`, `overheat_threshold = 220`
    /// - `initial_temperature = 20`, `initial_bread = 5`
    /// - `drift = 5%`, `seed = None`
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            step_duration: Duration::from_millis(500),
            heat_step: 2,
            cooldown: 30,
            overheat_threshold: 220,
            initial_temperature: 20,
            initial_bread: 5,
            drift: MoodDrift::default(),
            seed: None,
        }
    }
}

/// Settings for a toaster network.
#[derive(Clone, Debug)]
pub struct NetworkConfig {
    /// Capacity of the event bus broadcast ring buffer.
    ///
    /// Slow receivers that lag behind more than `bus_capacity` events skip older items.
    pub bus_capacity: usize,
    /// Defaults for devices created through the network.
    pub device: DeviceConfig,
}

impl NetworkConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            device: DeviceConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = DeviceConfig::default();
        assert_eq!(cfg.poll_interval, Duration::from_secs(1));
        assert_eq!(cfg.initial_bread, 5);
        assert_eq!(cfg.initial_temperature, 20);
        assert_eq!(cfg.drift.percent, 5);
    }

    #[test]
    fn test_clamps() {
        let cfg = DeviceConfig {
            poll_interval: Duration::ZERO,
            ..DeviceConfig::default()
        };
        assert_eq!(cfg.poll_interval_clamped(), Duration::from_millis(1));

        let net = NetworkConfig {
            bus_capacity: 0,
            ..NetworkConfig::default()
        };
        assert_eq!(net.bus_capacity_clamped(), 1);
    }
}
