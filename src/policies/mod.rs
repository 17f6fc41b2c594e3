//! Behavioral policies.
//!
//! ## Contents
//! - [`MoodDrift`] per-iteration chance that a smart toaster changes mood
//!
//! ## Wiring
//! ```text
//! DeviceConfig { drift: MoodDrift, seed: Option<u64> }
//!      └─► core::actor::ToastActor rolls drift once per loop iteration
//!          with the device's own StdRng
//! ```

mod drift;

pub use drift::MoodDrift;
