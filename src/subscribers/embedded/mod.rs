//! # Built-in subscribers
//!
//! - [`LogWriter`]: forwards rendered events to `tracing`.

mod log;

pub use log::LogWriter;
