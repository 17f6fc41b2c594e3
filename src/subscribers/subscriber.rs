//! # The [`Subscribe`] extension point.
//!
//! A subscriber is handed every event the network publishes, in publish order,
//! on a worker task of its own. See [`SubscriberSet`](crate::SubscriberSet) for
//! how slow or panicking subscribers are contained.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use async_trait::async_trait;
//! use toastnet::{Event, EventKind, Subscribe};
//!
//! #[derive(Default)]
//! struct BurntCounter(AtomicUsize);
//!
//! #[async_trait]
//! impl Subscribe for BurntCounter {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::JobFailed && ev.temperature.is_some() {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "burnt"
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Consumer of network events.
///
/// `on_event` runs off the publishing path, so a slow subscriber never delays a
/// toaster. It should still avoid blocking the executor.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event.
    async fn on_event(&self, event: &Event);

    /// Short name used in `SubscriberOverflow` / `SubscriberPanicked` reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
