//! # Device registry: keyed lifecycle coordinator.
//!
//! Holds every registered [`Device`] by id and ties the worker lifecycle to
//! registration:
//! - `add_device`    → insert, then `start()` smart toasters
//! - `remove_device` → take out, `stop()`, then await the loop's exit
//!
//! ## Architecture
//! ```text
//! add_device(d)                         remove_device(id)
//!   write lock                            write lock
//!     ├─ id taken? → DeviceExists           ├─ missing? → DeviceNotFound
//!     ├─ smart → start()                    ├─ remove entry
//!     └─ insert                             └─ smart → stop()
//!   unlock → DeviceAdded                  unlock → join loops → DeviceRemoved
//! ```
//!
//! ## Rules
//! - `start()` and `stop()` happen under the write lock, so a racing add/remove
//!   for one id never leaves a loop that nobody can stop.
//! - Joining happens after the lock is released; other devices are never
//!   blocked by a slow shutdown.
//! - The lock guards only the map; worker loops never touch it.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{
    devices::{Device, Operable},
    error::RegistryError,
    events::{Bus, Event, EventKind},
};

/// Concurrency-safe map of id → device.
pub struct Registry {
    devices: RwLock<HashMap<String, Device>>,
    bus: Bus,
}

impl Registry {
    /// Creates an empty registry publishing to `bus`.
    pub fn new(bus: Bus) -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
            bus,
        }
    }

    /// Registers a device and starts it if it is a smart toaster.
    ///
    /// Must be called inside a tokio runtime.
    pub async fn add_device(&self, device: impl Into<Device>) -> Result<(), RegistryError> {
        let device = device.into();
        let id = device.id().to_string();

        {
            let mut devices = self.devices.write().await;
            if devices.contains_key(&id) {
                return Err(RegistryError::DeviceExists { id });
            }
            if let Some(smart) = device.as_smart() {
                smart.start();
            }
            devices.insert(id.clone(), device);
        }

        self.bus
            .publish(Event::new(EventKind::DeviceAdded).with_device(id));
        Ok(())
    }

    /// Unregisters a device; smart toasters are stopped and their loops awaited.
    pub async fn remove_device(&self, id: &str) -> Result<(), RegistryError> {
        let device = {
            let mut devices = self.devices.write().await;
            let device = devices
                .remove(id)
                .ok_or_else(|| RegistryError::DeviceNotFound { id: id.to_string() })?;
            if let Some(smart) = device.as_smart() {
                smart.stop();
            }
            device
        };

        self.finish(device).await;
        Ok(())
    }

    /// Returns a handle to a registered device.
    pub async fn get(&self, id: &str) -> Option<Device> {
        self.devices.read().await.get(id).cloned()
    }

    /// Returns sorted list of registered ids.
    pub async fn list(&self) -> Vec<String> {
        let devices = self.devices.read().await;
        let mut ids: Vec<String> = devices.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered devices.
    pub async fn len(&self) -> usize {
        self.devices.read().await.len()
    }

    /// Returns true if registry is empty.
    pub async fn is_empty(&self) -> bool {
        self.devices.read().await.is_empty()
    }

    /// Status lines of every device, sorted by id.
    pub async fn statuses(&self) -> Vec<String> {
        let devices = self.devices.read().await;
        let mut entries: Vec<(&String, &Device)> = devices.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, d)| d.status()).collect()
    }

    /// Removes every device: stop all → join all → DeviceRemoved each.
    pub async fn shutdown_all(&self) {
        let drained: Vec<Device> = {
            let mut devices = self.devices.write().await;
            let drained: Vec<Device> = devices.drain().map(|(_, d)| d).collect();
            for smart in drained.iter().filter_map(Device::as_smart) {
                smart.stop();
            }
            drained
        };

        for device in drained {
            self.finish(device).await;
        }
    }

    async fn finish(&self, device: Device) {
        if let Some(smart) = device.as_smart() {
            smart.join_all().await;
        }
        self.bus
            .publish(Event::new(EventKind::DeviceRemoved).with_device(device.id().to_string()));
    }
}
