//! # ToastActor: the per-device worker loop.
//!
//! Drains one toaster's mailbox, running each recipe through
//! [`make_toast`](crate::core::runner::make_toast), and lets the device's mood
//! drift over time.
//!
//! ## Architecture
//! ```text
//! SmartToaster::start() ──► tokio::spawn(ToastActor::run(stop_token))
//!
//! lock mailbox (one loop dequeues at a time)
//! loop {
//!   ├─► wait ≤ poll_interval for a recipe   (stop token aborts the wait)
//!   │     └─ got one → make_toast()
//!   │            ├─ Ok           → (JobFinished published by runner)
//!   │            ├─ NoBread      → publish JobFailed, continue
//!   │            ├─ Overheat     → publish JobFailed, continue
//!   │            ├─ Canceled     → publish JobInterrupted
//!   │            └─ PoweredOff   → publish WorkerDead, exit(Fatal)
//!   ├─► roll MoodDrift            → publish MoodDrifted
//!   └─► stop requested?           → publish WorkerExited, exit(Stopped)
//! }
//! ```
//!
//! ## Rules
//! - One actor per device; jobs run strictly in enqueue order.
//! - The mailbox wait is the only suspension point besides simulated steps.
//! - Stop aborts an idle mailbox wait at once; mid-job it lands after the current step.
//! - A failed job never terminates the loop; only a contract violation does.

use std::sync::Arc;

use rand::rngs::StdRng;
use tokio::{select, sync::Mutex, sync::mpsc, time};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{runner::make_toast, state::DeviceCore},
    error::ToastError,
    events::{Event, EventKind},
    recipe::Recipe,
};

/// Receiving half of a device mailbox plus the device's drift RNG.
///
/// Owned by whichever loop currently holds the lock.
pub(crate) struct Mailbox {
    pub(crate) rx: mpsc::UnboundedReceiver<Recipe>,
    pub(crate) rng: StdRng,
}

/// Why a worker loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    /// `stop()` was observed.
    Stopped,
    /// The mailbox sender was dropped (device handle gone).
    Closed,
    /// A job violated the device contract (e.g. toaster powered off).
    Fatal,
}

/// Worker loop for one smart toaster.
pub(crate) struct ToastActor {
    core: Arc<DeviceCore>,
    mailbox: Arc<Mutex<Mailbox>>,
}

impl ToastActor {
    pub(crate) fn new(core: Arc<DeviceCore>, mailbox: Arc<Mutex<Mailbox>>) -> Self {
        Self { core, mailbox }
    }

    /// Runs until `stop` is cancelled, the mailbox closes, or a fatal job error.
    pub(crate) async fn run(self, stop: CancellationToken) -> WorkerExit {
        // A duplicate start() waits here until the previous loop lets go.
        let mut mailbox = select! {
            guard = self.mailbox.lock() => guard,
            _ = stop.cancelled() => return self.exited(WorkerExit::Stopped),
        };
        let poll = self.core.cfg.poll_interval_clamped();

        loop {
            if stop.is_cancelled() {
                break;
            }

            let next = select! {
                biased;
                _ = stop.cancelled() => break,
                res = time::timeout(poll, mailbox.rx.recv()) => res,
            };

            match next {
                Ok(Some(recipe)) => {
                    self.core.state.job_dequeued();
                    if let Err(e) = make_toast(&self.core, &recipe, &stop).await {
                        if let Some(exit) = self.on_job_error(&recipe, &e) {
                            return exit;
                        }
                    }
                }
                Ok(None) => return self.exited(WorkerExit::Closed),
                Err(_elapsed) => {}
            }

            self.maybe_drift(&mut mailbox.rng);

            if !self.core.state.is_running() {
                break;
            }
        }

        self.exited(WorkerExit::Stopped)
    }

    /// Publishes the outcome of a failed job; returns `Some` when the loop must exit.
    fn on_job_error(&self, recipe: &Recipe, err: &ToastError) -> Option<WorkerExit> {
        let core = &self.core;
        if err.is_fatal() {
            core.state.set_running(false);
            core.bus.publish_from(
                &core.id,
                Event::new(EventKind::WorkerDead)
                    .with_recipe(recipe)
                    .with_reason(err.to_string()),
            );
            return Some(WorkerExit::Fatal);
        }

        let kind = if err.is_recoverable() {
            EventKind::JobFailed
        } else {
            EventKind::JobInterrupted
        };
        core.bus.publish_from(
            &core.id,
            Event::new(kind)
                .with_recipe(recipe)
                .with_reason(err.to_string())
                .with_temperature(core.state.temperature())
                .with_bread(core.state.bread()),
        );
        None
    }

    fn maybe_drift(&self, rng: &mut StdRng) {
        if let Some(mood) = self.core.cfg.drift.roll(rng) {
            self.core.state.set_mood(mood);
            self.core
                .bus
                .publish_from(&self.core.id, Event::new(EventKind::MoodDrifted).with_mood(mood));
        }
    }

    fn exited(&self, exit: WorkerExit) -> WorkerExit {
        self.core
            .bus
            .publish_from(&self.core.id, Event::new(EventKind::WorkerExited));
        exit
    }
}
