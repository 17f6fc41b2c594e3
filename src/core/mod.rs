//! Runtime core: worker loops, state and lifecycle.
//!
//! Public API from this module: [`Registry`], [`ToasterNetwork`], the config
//! types and [`WorkerExit`].
//!
//! Internal modules:
//! - [`actor`]: the per-device worker loop (mailbox wait, drift, stop);
//! - [`runner`]: executes one job with step timing and failure checks;
//! - [`state`]: per-field atomic device state;
//! - [`registry`]: keyed device collection tied to worker lifecycle;
//! - [`network`]: owns the bus, subscribers and registry.

pub(crate) mod actor;
pub(crate) mod config;
mod network;
mod registry;
pub(crate) mod runner;
pub(crate) mod state;

pub use actor::WorkerExit;
pub use config::{DeviceConfig, NetworkConfig};
pub use network::{ToasterNetwork, ToasterNetworkBuilder};
pub use registry::Registry;
