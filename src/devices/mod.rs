//! Toaster devices.
//!
//! ## Contents
//! - [`Operable`] / [`Communicable`] capability traits
//! - [`SmartToaster`] worker variant (mailbox + background loop)
//! - [`ClassicToaster`] inline baseline variant
//! - [`Device`] tagged union the registry stores
//! - [`Mood`] job-timing state of smart toasters

mod classic;
mod device;
mod mood;
mod operable;
mod smart;

pub use classic::ClassicToaster;
pub use device::Device;
pub use mood::Mood;
pub use operable::{Communicable, Operable, ToasterSnapshot};
pub use smart::SmartToaster;
