//! # Shared device state.
//!
//! [`DeviceState`] holds every mutable field of a toaster as an individual
//! atomic, so `status()` can be read concurrently with the worker loop. A
//! status read is a per-field snapshot: fields may come from slightly
//! different instants, but none can be torn.
//!
//! ## Writers
//! - `temperature`: worker loop only
//! - `bread`: worker loop (consume) and `refill_bread` (add)
//! - `mood`: worker loop (drift) and `set_mood`
//! - `powered`, `running`: lifecycle calls
//! - `queued`: `enqueue` (+1) and worker loop (-1 on receive)

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU8, AtomicU32, AtomicUsize, Ordering};

use crate::core::config::DeviceConfig;
use crate::devices::Mood;
use crate::events::Bus;

/// Per-field atomic device state.
#[derive(Debug)]
pub(crate) struct DeviceState {
    powered: AtomicBool,
    running: AtomicBool,
    temperature: AtomicI32,
    mood: AtomicU8,
    bread: AtomicU32,
    queued: AtomicUsize,
}

impl DeviceState {
    pub(crate) fn new(initial_temperature: i32, initial_bread: u32) -> Self {
        Self {
            powered: AtomicBool::new(false),
            running: AtomicBool::new(false),
            temperature: AtomicI32::new(initial_temperature),
            mood: AtomicU8::new(Mood::default() as u8),
            bread: AtomicU32::new(initial_bread),
            queued: AtomicUsize::new(0),
        }
    }

    pub(crate) fn is_powered(&self) -> bool {
        self.powered.load(Ordering::Acquire)
    }

    pub(crate) fn set_powered(&self, on: bool) {
        self.powered.store(on, Ordering::Release);
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub(crate) fn set_running(&self, on: bool) {
        self.running.store(on, Ordering::Release);
    }

    pub(crate) fn temperature(&self) -> i32 {
        self.temperature.load(Ordering::Acquire)
    }

    /// Adds `delta` (may be negative); returns the new value.
    pub(crate) fn add_temperature(&self, delta: i32) -> i32 {
        self.temperature.fetch_add(delta, Ordering::AcqRel) + delta
    }

    pub(crate) fn mood(&self) -> Mood {
        Mood::from_u8(self.mood.load(Ordering::Acquire))
    }

    pub(crate) fn set_mood(&self, mood: Mood) {
        self.mood.store(mood as u8, Ordering::Release);
    }

    pub(crate) fn bread(&self) -> u32 {
        self.bread.load(Ordering::Acquire)
    }

    /// Adds bread (saturating); returns the new total.
    pub(crate) fn refill(&self, n: u32) -> u32 {
        let prev = self
            .bread
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |b| {
                Some(b.saturating_add(n))
            })
            .unwrap_or_else(|b| b);
        prev.saturating_add(n)
    }

    /// Takes one slice of bread; returns the remaining count, or `None` when empty.
    pub(crate) fn take_bread(&self) -> Option<u32> {
        self.bread
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |b| b.checked_sub(1))
            .ok()
            .map(|prev| prev - 1)
    }

    pub(crate) fn queued(&self) -> usize {
        self.queued.load(Ordering::Acquire)
    }

    pub(crate) fn job_queued(&self) {
        self.queued.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn job_dequeued(&self) {
        let _ = self
            .queued
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |q| q.checked_sub(1));
    }
}

/// Everything a worker loop needs about its device, shared with the handle.
pub(crate) struct DeviceCore {
    pub(crate) id: Arc<str>,
    pub(crate) cfg: DeviceConfig,
    pub(crate) bus: Bus,
    pub(crate) state: DeviceState,
}

impl DeviceCore {
    pub(crate) fn new(id: Arc<str>, cfg: DeviceConfig, bus: Bus) -> Self {
        let state = DeviceState::new(cfg.initial_temperature, cfg.initial_bread);
        Self {
            id,
            cfg,
            bus,
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_bread_stops_at_zero() {
        let s = DeviceState::new(20, 2);
        assert_eq!(s.take_bread(), Some(1));
        assert_eq!(s.take_bread(), Some(0));
        assert_eq!(s.take_bread(), None);
        assert_eq!(s.bread(), 0);
    }

    #[test]
    fn test_refill_returns_total() {
        let s = DeviceState::new(20, 0);
        assert_eq!(s.refill(3), 3);
        assert_eq!(s.refill(2), 5);
    }

    #[test]
    fn test_temperature_may_go_negative() {
        let s = DeviceState::new(10, 0);
        assert_eq!(s.add_temperature(-30), -20);
        assert_eq!(s.temperature(), -20);
    }

    #[test]
    fn test_queue_counter_never_underflows() {
        let s = DeviceState::new(20, 0);
        s.job_dequeued();
        assert_eq!(s.queued(), 0);
        s.job_queued();
        s.job_queued();
        s.job_dequeued();
        assert_eq!(s.queued(), 1);
    }

    #[test]
    fn test_mood_roundtrip() {
        let s = DeviceState::new(20, 0);
        assert_eq!(s.mood(), Mood::Cheerful);
        s.set_mood(Mood::Grumpy);
        assert_eq!(s.mood(), Mood::Grumpy);
    }
}
