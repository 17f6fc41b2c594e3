//! # toastnet
//!
//! **toastnet** simulates a network of toasters. Each smart toaster owns a job
//! mailbox drained by its own background worker, with timing stretched by the
//! device's mood and two recoverable failures (no bread, overheat) that never
//! kill the worker.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     caller ──enqueue(Recipe)──┐       caller ──add/remove──┐
//!                               ▼                             ▼
//!     ┌─────────────────────────────────┐   ┌──────────────────────────────┐
//!     │ SmartToaster                    │◄──│ Registry                      │
//!     │  - mailbox (unbounded FIFO)     │   │  - RwLock<HashMap<id,Device>> │
//!     │  - DeviceState (atomics)        │   │  - start() on add             │
//!     │  - ToastActor (tokio task)      │   │  - stop() + join on remove    │
//!     └──────────────┬──────────────────┘   └──────────────┬───────────────┘
//!                    │ publishes                           │ publishes
//!                    ▼                                     ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! │               (capacity: NetworkConfig::bus_capacity)             │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                             SubscriberSet
//!                     (one receiver + worker per sub)
//!                         ┌─────────┼─────────┐
//!                         ▼         ▼         ▼
//!                     LogWriter   sub2      subN
//!                     (tracing)
//! ```
//!
//! ### Worker loop
//! ```text
//! loop {
//!   ├─► wait ≤ poll_interval on mailbox (stop aborts the wait)
//!   │     └─ recipe → make_toast()
//!   │           ├─ Ok          → JobFinished
//!   │           ├─ NoBread     → JobFailed, continue
//!   │           ├─ Overheat    → JobFailed, continue
//!   │           ├─ Canceled    → JobInterrupted
//!   │           └─ PoweredOff  → WorkerDead, exit
//!   ├─► 5% chance: mood = random → MoodDrifted
//!   └─► !running → WorkerExited, exit
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                          |
//! |-------------------|----------------------------------------------------------|---------------------------------------------|
//! | **Devices**       | Worker and inline toaster variants behind one contract.  | [`SmartToaster`], [`ClassicToaster`], [`Operable`] |
//! | **Registry**      | Concurrent add/remove tied to worker lifecycle.          | [`Registry`], [`Device`]                    |
//! | **Events**        | Every observable action becomes an event on a bus.       | [`Event`], [`EventKind`], [`Bus`]           |
//! | **Subscriber API**| Consume events (logging or custom).                      | [`Subscribe`], [`LogWriter`]                |
//! | **Errors**        | Typed job and registry errors.                           | [`ToastError`], [`RegistryError`]           |
//! | **Configuration** | Timing, thermal limits, drift and seeds.                 | [`DeviceConfig`], [`NetworkConfig`]         |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use toastnet::{LogWriter, NetworkConfig, Operable, Recipe, Subscribe, ToasterNetwork};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::default())];
//!     let net = ToasterNetwork::builder(NetworkConfig::default())
//!         .with_subscribers(subs)
//!         .build();
//!
//!     let kitchen = net.smart_toaster("kitchen");
//!     kitchen.power_on();
//!     net.registry().add_device(kitchen.clone()).await?;
//!
//!     kitchen.enqueue(Recipe::new("Sourdough", 6, 1));
//!     println!("{}", kitchen.status());
//!
//!     net.shutdown().await;
//!     Ok(())
//! }
//! ```
mod core;
mod devices;
mod error;
mod events;
mod policies;
mod recipe;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{
    DeviceConfig, NetworkConfig, Registry, ToasterNetwork, ToasterNetworkBuilder, WorkerExit,
};
pub use devices::{
    ClassicToaster, Communicable, Device, Mood, Operable, SmartToaster, ToasterSnapshot,
};
pub use error::{ErrorKind, RegistryError, ToastError};
pub use events::{Bus, Event, EventKind};
pub use policies::MoodDrift;
pub use recipe::Recipe;
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
