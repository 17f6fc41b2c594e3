//! # ToasterNetwork: owner of the bus, subscribers and registry.
//!
//! Wires everything a running network needs and hands devices their injected
//! dependencies (bus + config).
//!
//! ## Architecture
//! ```text
//! ToasterNetwork::builder(cfg).with_subscribers(subs).build()
//!   ├─ Bus::new(cfg.bus_capacity)
//!   ├─ SubscriberSet::spawn(subs, &bus)   (one bus receiver per subscriber)
//!   └─ Registry::new(bus)
//!
//! smart_toaster(id) / classic_toaster(id) → device wired to the same bus
//!
//! shutdown()
//!   ├─ registry.shutdown_all()      (stop + join every worker)
//!   └─ SubscriberSet::shutdown()    (subscribers drain the bus backlog)
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use toastnet::{LogWriter, NetworkConfig, Recipe, Subscribe, ToasterNetwork, Operable};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), toastnet::RegistryError> {
//! let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
//! let net = ToasterNetwork::builder(NetworkConfig::default())
//!     .with_subscribers(subs)
//!     .build();
//!
//! let t1 = net.smart_toaster("t1");
//! t1.power_on();
//! net.registry().add_device(t1.clone()).await?;
//! t1.enqueue(Recipe::new("Bagel", 4, 1));
//!
//! net.shutdown().await;
//! # Ok(())
//! # }
//! ```

use std::sync::{
    Arc, Mutex as StdMutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::broadcast;

use crate::{
    core::{config::NetworkConfig, registry::Registry},
    devices::{ClassicToaster, SmartToaster},
    events::{Bus, Event},
    subscribers::{Subscribe, SubscriberSet},
};

/// Builder for [`ToasterNetwork`].
pub struct ToasterNetworkBuilder {
    cfg: NetworkConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl ToasterNetworkBuilder {
    /// Sets event subscribers.
    ///
    /// Each one gets a dedicated worker reading its own bus receiver.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the network and spawns the subscriber workers.
    ///
    /// Must be called inside a tokio runtime.
    pub fn build(self) -> Arc<ToasterNetwork> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = SubscriberSet::spawn(self.subscribers, &bus);

        Arc::new(ToasterNetwork {
            registry: Registry::new(bus.clone()),
            bus,
            cfg: self.cfg,
            created: AtomicU64::new(0),
            subs: StdMutex::new(Some(subs)),
        })
    }
}

/// A registry of toasters sharing one event bus.
pub struct ToasterNetwork {
    cfg: NetworkConfig,
    bus: Bus,
    registry: Registry,
    created: AtomicU64,
    subs: StdMutex<Option<SubscriberSet>>,
}

impl ToasterNetwork {
    /// Starts building a network.
    pub fn builder(cfg: NetworkConfig) -> ToasterNetworkBuilder {
        ToasterNetworkBuilder {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// The shared event bus.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Subscribes to every event published in the network.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// The device registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Creates (does not register) a smart toaster wired to this network.
    ///
    /// With `cfg.device.seed` set, each toaster gets its own seed derived from
    /// it and the creation order, so runs are reproducible.
    pub fn smart_toaster(&self, id: impl Into<Arc<str>>) -> Arc<SmartToaster> {
        let n = self.created.fetch_add(1, Ordering::Relaxed);
        let mut cfg = self.cfg.device.clone();
        cfg.seed = derive_seed(cfg.seed, n);
        Arc::new(SmartToaster::new(id, self.bus.clone(), cfg))
    }

    /// Creates (does not register) a classic toaster wired to this network.
    pub fn classic_toaster(&self, id: impl Into<Arc<str>>) -> Arc<ClassicToaster> {
        Arc::new(ClassicToaster::new(id, self.bus.clone()))
    }

    /// Removes every device, then flushes and stops the subscribers.
    ///
    /// Idempotent; a second call only sweeps the registry.
    pub async fn shutdown(&self) {
        self.registry.shutdown_all().await;

        let subs = self.subs.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(set) = subs {
            set.shutdown().await;
        }
    }
}

/// Per-device seed: base seed mixed with creation index.
fn derive_seed(base: Option<u64>, n: u64) -> Option<u64> {
    base.map(|s| s ^ n.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
