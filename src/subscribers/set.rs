//! # Subscriber workers fed straight from the bus.
//!
//! [`SubscriberSet::spawn`] opens one bus receiver per subscriber and drives it
//! on a dedicated task:
//!
//! ```text
//! Bus ──► rx(LogWriter) ──► worker ──► LogWriter.on_event()
//!    └──► rx(custom)    ──► worker ──► custom.on_event()
//! ```
//!
//! ## Rules
//! - Each subscriber sees events in publish order; subscribers do not wait on each other.
//! - A subscriber that lags more than the bus capacity loses the oldest events;
//!   once it has caught up, the loss is published as `SubscriberOverflow`
//!   with the skipped count.
//! - A panic in `on_event` is caught and published as `SubscriberPanicked`;
//!   the worker keeps going.
//! - A subscriber is never handed reports about itself, and a failure while
//!   handling another subscriber's report is only traced, so reports cannot
//!   feed back into each other.
//! - `shutdown` lets every worker drain what was published before it.

use std::{any::Any, panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use tokio::{
    select,
    sync::broadcast::{Receiver, error::RecvError},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::events::{Bus, Event, EventKind};
use crate::subscribers::Subscribe;

/// Running subscriber workers of one network.
pub struct SubscriberSet {
    stop: CancellationToken,
    workers: Vec<JoinHandle<()>>,
}

impl SubscriberSet {
    /// Subscribes every entry to `bus` and spawns its worker.
    ///
    /// Receivers are opened before this returns, so nothing published
    /// afterwards is missed. Must be called inside a tokio runtime.
    #[must_use]
    pub fn spawn(subs: Vec<Arc<dyn Subscribe>>, bus: &Bus) -> Self {
        let stop = CancellationToken::new();
        let workers = subs
            .into_iter()
            .map(|sub| {
                let rx = bus.subscribe();
                tokio::spawn(drive(sub, rx, bus.clone(), stop.clone()))
            })
            .collect();
        Self { stop, workers }
    }

    /// Number of subscriber workers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Drains pending events, then stops every worker.
    pub async fn shutdown(self) {
        self.stop.cancel();
        for w in self.workers {
            let _ = w.await;
        }
    }
}

async fn drive(sub: Arc<dyn Subscribe>, mut rx: Receiver<Event>, bus: Bus, stop: CancellationToken) {
    let name = sub.name();
    let mut lost = 0u64;
    loop {
        // Pending events win over stop, so shutdown drains the backlog first.
        let msg = select! {
            biased;
            msg = rx.recv() => msg,
            _ = stop.cancelled() => break,
        };
        match msg {
            Ok(ev) if is_report(&ev) && ev.device.as_deref() == Some(name) => {}
            Ok(ev) => deliver(sub.as_ref(), &ev, &bus).await,
            Err(RecvError::Lagged(skipped)) => lost += skipped,
            Err(RecvError::Closed) => break,
        }

        // Report only once caught up: publishing into a full ring would
        // overwrite the next event this receiver still has to read.
        if lost > 0 && rx.is_empty() {
            tracing::warn!(subscriber = name, skipped = lost, "subscriber lagged behind the bus");
            bus.publish(Event::subscriber_overflow(name, lost));
            lost = 0;
        }
    }
}

async fn deliver(sub: &dyn Subscribe, ev: &Event, bus: &Bus) {
    let Err(payload) = AssertUnwindSafe(sub.on_event(ev)).catch_unwind().await else {
        return;
    };
    let info = panic_message(payload.as_ref());
    tracing::warn!(subscriber = sub.name(), %info, "subscriber panicked");
    if !is_report(ev) {
        bus.publish(Event::subscriber_panicked(sub.name(), info));
    }
}

fn is_report(ev: &Event) -> bool {
    matches!(
        ev.kind,
        EventKind::SubscriberPanicked | EventKind::SubscriberOverflow
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&'static str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
