//! Tagged union over the toaster variants held by the registry.

use std::sync::Arc;

use crate::devices::{ClassicToaster, Operable, SmartToaster, ToasterSnapshot};

/// A registered device.
///
/// Cheap to clone; both variants are shared handles.
#[derive(Clone)]
pub enum Device {
    /// Worker variant with a mailbox and background loop.
    Smart(Arc<SmartToaster>),
    /// Inline baseline variant.
    Classic(Arc<ClassicToaster>),
}

impl Device {
    /// Returns the worker variant, if this is one.
    pub fn as_smart(&self) -> Option<&Arc<SmartToaster>> {
        match self {
            Device::Smart(t) => Some(t),
            Device::Classic(_) => None,
        }
    }

    /// Returns the inline variant, if this is one.
    pub fn as_classic(&self) -> Option<&Arc<ClassicToaster>> {
        match self {
            Device::Classic(t) => Some(t),
            Device::Smart(_) => None,
        }
    }

    fn operable(&self) -> &dyn Operable {
        match self {
            Device::Smart(t) => t.as_ref(),
            Device::Classic(t) => t.as_ref(),
        }
    }
}

impl Operable for Device {
    fn id(&self) -> &str {
        self.operable().id()
    }

    fn power_on(&self) {
        self.operable().power_on();
    }

    fn power_off(&self) {
        self.operable().power_off();
    }

    fn snapshot(&self) -> ToasterSnapshot {
        self.operable().snapshot()
    }
}

impl From<Arc<SmartToaster>> for Device {
    fn from(t: Arc<SmartToaster>) -> Self {
        Device::Smart(t)
    }
}

impl From<SmartToaster> for Device {
    fn from(t: SmartToaster) -> Self {
        Device::Smart(Arc::new(t))
    }
}

impl From<Arc<ClassicToaster>> for Device {
    fn from(t: Arc<ClassicToaster>) -> Self {
        Device::Classic(t)
    }
}

impl From<ClassicToaster> for Device {
    fn from(t: ClassicToaster) -> Self {
        Device::Classic(Arc::new(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::config::DeviceConfig, events::Bus};

    #[test]
    fn test_dispatch_by_variant() {
        let smart: Device = SmartToaster::new("s1", Bus::new(8), DeviceConfig::default()).into();
        let classic: Device = ClassicToaster::new("c1", Bus::new(8)).into();

        assert_eq!(smart.id(), "s1");
        assert!(smart.as_smart().is_some());
        assert!(smart.as_classic().is_none());
        assert_eq!(classic.id(), "c1");
        assert!(classic.as_smart().is_none());

        classic.power_on();
        assert!(classic.snapshot().powered);
        assert!(smart.snapshot().mood.is_some());
        assert!(classic.snapshot().mood.is_none());
    }
}
