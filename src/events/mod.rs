//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by toasters, their worker loops and
//! the registry.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `SmartToaster`, `ClassicToaster`, the worker loop,
//!   `runner::make_toast`, `Registry`, `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: `SubscriberSet` workers (one receiver each), or any
//!   caller holding `Bus::subscribe()`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
