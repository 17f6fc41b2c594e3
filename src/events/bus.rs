//! # Shared event bus of a toaster network.
//!
//! Every device, worker loop and the registry hold a clone of the same [`Bus`].
//! Each subscriber worker owns its own receiver:
//!
//! ```text
//!   t1 worker ─┐                      ┌─► rx ─► LogWriter
//!   t2 worker ─┼─ publish_from(id) ─► Bus ─┼─► rx ─► custom subscriber
//!   Registry  ─┘                      └─► rx ─► test harness (subscribe())
//! ```
//!
//! A receiver that falls more than `capacity` events behind loses the oldest
//! ones and sees `RecvError::Lagged`. Publishing with nobody listening is a no-op.

use std::sync::Arc;

use tokio::sync::broadcast;

use super::event::Event;

/// Cloneable handle to a network's broadcast channel.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus retaining up to `capacity` undelivered events (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            tx: broadcast::channel(capacity.max(1)).0,
        }
    }

    /// Sends an event to every current receiver. Never fails.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Stamps `device` on the event, then publishes it.
    pub(crate) fn publish_from(&self, device: &Arc<str>, ev: Event) {
        self.publish(ev.with_device(Arc::clone(device)));
    }

    /// Opens a receiver for events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[test]
    fn test_zero_capacity_is_usable() {
        let bus = Bus::new(0);
        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::WorkerStarted));
        assert_eq!(rx.try_recv().unwrap().kind, EventKind::WorkerStarted);
    }

    #[test]
    fn test_publish_from_stamps_device() {
        let bus = Bus::new(8);
        bus.publish(Event::new(EventKind::WorkerStarted));
        let mut rx = bus.subscribe();

        let id: Arc<str> = Arc::from("t1");
        bus.publish_from(&id, Event::new(EventKind::WorkerStopped));

        let ev = rx.try_recv().unwrap();
        assert_eq!(ev.kind, EventKind::WorkerStopped);
        assert_eq!(ev.device.as_deref(), Some("t1"));
        assert!(rx.try_recv().is_err());
    }
}
