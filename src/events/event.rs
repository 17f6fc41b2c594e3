//! # Runtime events emitted by toasters, workers and the registry.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Registry events**: devices added/removed
//! - **Worker events**: loop started/stopped/exited/dead
//! - **Job events**: queued, starting, finished, failed, interrupted
//! - **Device events**: mood changes, refills, local messages
//!
//! The [`Event`] struct carries the metadata (device id, recipe, mood,
//! temperature, bread count, reason) and renders a human-readable line via
//! [`Event::message`].
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use toastnet::{Event, EventKind, Recipe};
//!
//! let ev = Event::new(EventKind::JobQueued)
//!     .with_device("t1")
//!     .with_recipe(&Recipe::new("Sourdough", 5, 3));
//!
//! assert_eq!(ev.kind, EventKind::JobQueued);
//! assert_eq!(ev.device.as_deref(), Some("t1"));
//! assert_eq!(ev.message(), "t1 queued: Sourdough (lvl 5, 3s)");
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::devices::Mood;
use crate::recipe::Recipe;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `device`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber fell behind the bus and lost events.
    ///
    /// Sets:
    /// - `device`: subscriber name
    /// - `reason`: how many events were skipped
    SubscriberOverflow,

    // === Registry events ===
    /// Device inserted into the registry.
    ///
    /// Sets:
    /// - `device`: device id
    DeviceAdded,

    /// Device removed from the registry (after its worker joined).
    ///
    /// Sets:
    /// - `device`: device id
    DeviceRemoved,

    // === Worker events ===
    /// `start()` spawned a worker loop.
    ///
    /// Sets:
    /// - `device`: device id
    WorkerStarted,

    /// `stop()` signalled the worker loop.
    ///
    /// Sets:
    /// - `device`: device id
    WorkerStopped,

    /// Worker loop observed the stop and exited.
    ///
    /// Sets:
    /// - `device`: device id
    WorkerExited,

    /// Worker loop terminated on a contract violation, or its task panicked.
    ///
    /// Sets:
    /// - `device`: device id
    /// - `reason`: error label or `worker_panic`
    WorkerDead,

    // === Job events ===
    /// Recipe appended to the mailbox.
    ///
    /// Sets:
    /// - `device`, `recipe`
    JobQueued,

    /// Job began executing.
    ///
    /// Sets:
    /// - `device`, `recipe`, `mood`, `steps` (effective duration)
    JobStarting,

    /// Job completed.
    ///
    /// Sets:
    /// - `device`, `recipe`, `bread` (left), `temperature` (after cooldown)
    JobFinished,

    /// Job abandoned on a recoverable domain failure.
    ///
    /// Sets:
    /// - `device`, `recipe`, `reason` (error message), `temperature`, `bread`
    JobFailed,

    /// Job abandoned because the worker was stopped mid-job.
    ///
    /// Sets:
    /// - `device`, `recipe`
    JobInterrupted,

    // === Device events ===
    /// Mood replaced by random drift.
    ///
    /// Sets:
    /// - `device`, `mood`
    MoodDrifted,

    /// Mood overridden by a caller.
    ///
    /// Sets:
    /// - `device`, `mood`
    MoodSet,

    /// Bread added.
    ///
    /// Sets:
    /// - `device`, `bread` (new total), `amount`
    BreadRefilled,

    /// Device emitted a local message.
    ///
    /// Sets:
    /// - `device`, `reason` (message text)
    MessageSent,

    /// Device received a local message.
    ///
    /// Sets:
    /// - `device`, `reason` (message text)
    MessageReceived,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Device id (or subscriber name for subscriber events).
    pub device: Option<Arc<str>>,
    /// Rendered recipe (`name (lvl N, Ns)`).
    pub recipe: Option<Arc<str>>,
    /// Human-readable reason (errors, overflow details, message text).
    pub reason: Option<Arc<str>>,
    /// Mood at the time of the event.
    pub mood: Option<Mood>,
    /// Effective job duration in simulated steps.
    pub steps: Option<u32>,
    /// Device temperature in °C.
    pub temperature: Option<i32>,
    /// Bread count.
    pub bread: Option<u32>,
    /// Amount added by a refill.
    pub amount: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            device: None,
            recipe: None,
            reason: None,
            mood: None,
            steps: None,
            temperature: None,
            bread: None,
            amount: None,
        }
    }

    /// Attaches a device id.
    #[inline]
    pub fn with_device(mut self, device: impl Into<Arc<str>>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Attaches a rendered recipe.
    #[inline]
    pub fn with_recipe(mut self, recipe: &Recipe) -> Self {
        self.recipe = Some(recipe.to_string().into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a mood.
    #[inline]
    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    /// Attaches an effective step count.
    #[inline]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Attaches a temperature.
    #[inline]
    pub fn with_temperature(mut self, temperature: i32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Attaches a bread count.
    #[inline]
    pub fn with_bread(mut self, bread: u32) -> Self {
        self.bread = Some(bread);
        self
    }

    /// Attaches a refill amount.
    #[inline]
    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Creates a subscriber overflow event for `skipped` lost events.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, skipped: u64) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_device(subscriber)
            .with_reason(format!("lagged, {skipped} events skipped"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_device(subscriber)
            .with_reason(info)
    }

    /// Returns `true` for job failures and dead workers.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self.kind, EventKind::JobFailed | EventKind::WorkerDead)
    }

    /// Milliseconds since the Unix epoch at which the event was created.
    ///
    /// Zero if the clock reads earlier than the epoch.
    pub fn at_unix_ms(&self) -> u64 {
        self.at
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or_default()
    }

    /// Renders the event as a single log line (without timestamp).
    pub fn message(&self) -> String {
        let dev = self.device.as_deref().unwrap_or("?");
        let recipe = self.recipe.as_deref().unwrap_or("?");
        let reason = self.reason.as_deref().unwrap_or("");
        let mood = self.mood.unwrap_or_default();

        match self.kind {
            EventKind::SubscriberPanicked => format!("subscriber {dev} panicked: {reason}"),
            EventKind::SubscriberOverflow => format!("subscriber {dev} {reason}"),
            EventKind::DeviceAdded => format!("Manager added {dev}"),
            EventKind::DeviceRemoved => format!("Manager removed {dev}"),
            EventKind::WorkerStarted => format!("{dev} started"),
            EventKind::WorkerStopped => format!("{dev} stopped"),
            EventKind::WorkerExited => format!("{dev} worker exited"),
            EventKind::WorkerDead => format!("{dev} worker dead: {reason}"),
            EventKind::JobQueued => format!("{dev} queued: {recipe}"),
            EventKind::JobStarting => match self.mood {
                Some(m) => format!(
                    "{dev} starts making: {recipe} (mood={m}, time={}s)",
                    self.steps.unwrap_or(0)
                ),
                None => format!(
                    "{dev} starts making: {recipe} (time={}s)",
                    self.steps.unwrap_or(0)
                ),
            },
            EventKind::JobFinished => match self.bread {
                Some(n) => format!("{dev} finished: {recipe}. Bread left={n}"),
                None => format!("{dev} finished: {recipe}"),
            },
            EventKind::JobFailed => format!("{dev} failed: {recipe}: {reason}"),
            EventKind::JobInterrupted => format!("{dev} interrupted: {recipe}"),
            EventKind::MoodDrifted => format!("{dev} mood now {mood}"),
            EventKind::MoodSet => format!("{dev} mood set to {mood}"),
            EventKind::BreadRefilled => format!(
                "{dev} refilled +{} -> {}",
                self.amount.unwrap_or(0),
                self.bread.unwrap_or(0)
            ),
            EventKind::MessageSent => format!("{dev} sends: {reason}"),
            EventKind::MessageReceived => format!("{dev} received: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::JobQueued);
        let b = Event::new(EventKind::JobQueued);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_timestamp_is_taken_at_creation() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let ev = Event::new(EventKind::WorkerStarted);
        assert!(ev.at_unix_ms() >= before);

        let mut ev = ev;
        ev.at = UNIX_EPOCH + std::time::Duration::from_millis(1_500);
        assert_eq!(ev.at_unix_ms(), 1_500);
    }

    #[test]
    fn test_messages() {
        let r = Recipe::new("Rye", 3, 4);
        let start = Event::new(EventKind::JobStarting)
            .with_device("t1")
            .with_recipe(&r)
            .with_mood(Mood::Lazy)
            .with_steps(6);
        assert_eq!(
            start.message(),
            "t1 starts making: Rye (lvl 3, 4s) (mood=LAZY, time=6s)"
        );

        let done = Event::new(EventKind::JobFinished)
            .with_device("t1")
            .with_recipe(&r)
            .with_bread(4);
        assert_eq!(done.message(), "t1 finished: Rye (lvl 3, 4s). Bread left=4");

        let refill = Event::new(EventKind::BreadRefilled)
            .with_device("t1")
            .with_amount(3)
            .with_bread(7);
        assert_eq!(refill.message(), "t1 refilled +3 -> 7");
    }

    #[test]
    fn test_classic_messages_omit_worker_fields() {
        let r = Recipe::new("White", 2, 2);
        let start = Event::new(EventKind::JobStarting)
            .with_device("v1")
            .with_recipe(&r)
            .with_steps(2);
        assert_eq!(start.message(), "v1 starts making: White (lvl 2, 2s) (time=2s)");

        let done = Event::new(EventKind::JobFinished)
            .with_device("v1")
            .with_recipe(&r);
        assert_eq!(done.message(), "v1 finished: White (lvl 2, 2s)");
    }

    #[test]
    fn test_failure_classification() {
        assert!(Event::new(EventKind::JobFailed).is_failure());
        assert!(Event::new(EventKind::WorkerDead).is_failure());
        assert!(!Event::new(EventKind::JobFinished).is_failure());
    }
}
