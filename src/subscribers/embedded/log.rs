//! # LogWriter: event-to-tracing bridge
//!
//! A subscriber that renders every incoming [`Event`] with [`Event::message`]
//! and forwards it to `tracing`. Timestamps and output format come from
//! whatever `tracing` subscriber the host installs; the event's own creation
//! time travels along as the `at_ms` field.
//!
//! ## Example output (with `tracing_subscriber::fmt`)
//! ```text
//! 2026-10-14T09:12:01.120Z  INFO toastnet: t1 queued: Sourdough (lvl 5, 3s) seq=4 at_ms=1791969121120
//! 2026-10-14T09:12:01.121Z  INFO toastnet: t1 starts making: Sourdough (lvl 5, 3s) (mood=CHEERFUL, time=3s) seq=5 at_ms=1791969121121
//! 2026-10-14T09:12:02.622Z  INFO toastnet: t1 finished: Sourdough (lvl 5, 3s). Bread left=4 seq=6 at_ms=1791969122622
//! 2026-10-14T09:12:03.130Z  WARN toastnet: t2 failed: Rye (lvl 2, 1s): t2 has no bread seq=9 at_ms=1791969123130
//! ```

use async_trait::async_trait;
use tracing::Level;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn level(kind: EventKind) -> Level {
        match kind {
            EventKind::WorkerDead | EventKind::SubscriberPanicked => Level::ERROR,
            EventKind::JobFailed | EventKind::SubscriberOverflow => Level::WARN,
            EventKind::MessageSent | EventKind::MessageReceived => Level::DEBUG,
            _ => Level::INFO,
        }
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let msg = e.message();
        let level = Self::level(e.kind);
        let at_ms = e.at_unix_ms();
        if level == Level::ERROR {
            tracing::error!(target: "toastnet", seq = e.seq, at_ms, "{msg}");
        } else if level == Level::WARN {
            tracing::warn!(target: "toastnet", seq = e.seq, at_ms, "{msg}");
        } else if level == Level::DEBUG {
            tracing::debug!(target: "toastnet", seq = e.seq, at_ms, "{msg}");
        } else {
            tracing::info!(target: "toastnet", seq = e.seq, at_ms, "{msg}");
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_by_kind() {
        assert_eq!(LogWriter::level(EventKind::WorkerDead), Level::ERROR);
        assert_eq!(LogWriter::level(EventKind::JobFailed), Level::WARN);
        assert_eq!(LogWriter::level(EventKind::JobFinished), Level::INFO);
        assert_eq!(LogWriter::level(EventKind::JobQueued), Level::INFO);
        assert_eq!(LogWriter::level(EventKind::MessageSent), Level::DEBUG);
    }

    #[tokio::test]
    async fn test_on_event_without_subscriber_is_silent() {
        let w = LogWriter::new();
        w.on_event(&Event::new(EventKind::MoodDrifted).with_device("t1"))
            .await;
        assert_eq!(w.name(), "LogWriter");
    }
}
