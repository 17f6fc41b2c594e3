//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out
//! and the built-in [`LogWriter`] sink.
//!
//! ## Architecture
//! ```text
//! Toaster ── publish(Event) ──► Bus ──► SubscriberSet (one receiver per sub)
//!                                               │
//!                                  ┌────────────┼────────────┐
//!                                  ▼            ▼            ▼
//!                              LogWriter     Metrics       Custom
//! ```

mod embedded;
mod set;
mod subscriber;

pub use embedded::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
