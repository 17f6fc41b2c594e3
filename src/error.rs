//! Error types used by toaster devices and the registry.
//!
//! This module defines:
//!
//! - [`ToastError`]: failures of a single toasting job.
//! - [`ErrorKind`]: coarse classification separating contract misuse from domain conditions.
//! - [`RegistryError`]: failures of registry bookkeeping.
//!
//! Both error enums provide `as_label` (stable snake_case) for logs/events.

use thiserror::Error;

/// Coarse classification of a [`ToastError`].
///
/// Lets callers tell "you violated a precondition" apart from "a domain condition occurred".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The device was used outside its contract (e.g. while powered off).
    ProgrammingError,
    /// A consumable resource ran out (no bread).
    ResourceExhausted,
    /// The device crossed its overheat threshold mid-job.
    OverheatCondition,
    /// The worker was asked to stop while the job was in flight.
    Cancelled,
}

/// # Errors produced by a toasting job.
///
/// `NoBread` and `Overheat` are recoverable: the job is dropped and the worker
/// keeps running. `PoweredOff` is a contract violation and terminates the worker.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToastError {
    /// The device was asked to toast while powered off.
    #[error("toaster {device} is off")]
    PoweredOff {
        /// Device id.
        device: String,
    },

    /// No bread left to toast.
    #[error("{device} has no bread")]
    NoBread {
        /// Device id.
        device: String,
    },

    /// Temperature exceeded the overheat threshold before a heating step.
    #[error("{device} overheated at {temperature}°C")]
    Overheat {
        /// Device id.
        device: String,
        /// Temperature observed when the job was aborted.
        temperature: i32,
    },

    /// The worker was stopped before the job completed.
    #[error("job interrupted")]
    Canceled,
}

impl ToastError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    ///
    /// # Example
    /// ```
    /// use toastnet::ToastError;
    ///
    /// let err = ToastError::NoBread { device: "t1".into() };
    /// assert_eq!(err.as_label(), "no_bread");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ToastError::PoweredOff { .. } => "toaster_powered_off",
            ToastError::NoBread { .. } => "no_bread",
            ToastError::Overheat { .. } => "overheat",
            ToastError::Canceled => "job_canceled",
        }
    }

    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToastError::PoweredOff { .. } => ErrorKind::ProgrammingError,
            ToastError::NoBread { .. } => ErrorKind::ResourceExhausted,
            ToastError::Overheat { .. } => ErrorKind::OverheatCondition,
            ToastError::Canceled => ErrorKind::Cancelled,
        }
    }

    /// Indicates whether the worker may continue after this error.
    ///
    /// Returns `true` for [`ToastError::NoBread`] and [`ToastError::Overheat`].
    ///
    /// # Example
    /// ```
    /// use toastnet::ToastError;
    ///
    /// let hot = ToastError::Overheat { device: "t1".into(), temperature: 222 };
    /// assert!(hot.is_recoverable());
    ///
    /// let off = ToastError::PoweredOff { device: "t1".into() };
    /// assert!(!off.is_recoverable());
    /// ```
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ResourceExhausted | ErrorKind::OverheatCondition
        )
    }

    /// Indicates a contract violation that must stop the worker.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::ProgrammingError)
    }
}

/// # Errors produced by the device registry.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A device with the same id is already registered.
    #[error("device {id} already registered")]
    DeviceExists {
        /// The conflicting id.
        id: String,
    },

    /// No device is registered under the id.
    #[error("device {id} not found")]
    DeviceNotFound {
        /// The missing id.
        id: String,
    },
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::DeviceExists { .. } => "device_already_exists",
            RegistryError::DeviceNotFound { .. } => "device_not_found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        let off = ToastError::PoweredOff { device: "a".into() };
        let bread = ToastError::NoBread { device: "a".into() };
        let hot = ToastError::Overheat {
            device: "a".into(),
            temperature: 221,
        };

        assert_eq!(off.kind(), ErrorKind::ProgrammingError);
        assert_eq!(bread.kind(), ErrorKind::ResourceExhausted);
        assert_eq!(hot.kind(), ErrorKind::OverheatCondition);
        assert_eq!(ToastError::Canceled.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_recoverable_vs_fatal() {
        let off = ToastError::PoweredOff { device: "a".into() };
        assert!(off.is_fatal());
        assert!(!off.is_recoverable());

        let bread = ToastError::NoBread { device: "a".into() };
        assert!(bread.is_recoverable());
        assert!(!bread.is_fatal());

        assert!(!ToastError::Canceled.is_recoverable());
        assert!(!ToastError::Canceled.is_fatal());
    }

    #[test]
    fn test_display_messages() {
        let hot = ToastError::Overheat {
            device: "t9".into(),
            temperature: 224,
        };
        assert_eq!(hot.to_string(), "t9 overheated at 224°C");
        assert_eq!(hot.as_label(), "overheat");

        let missing = RegistryError::DeviceNotFound { id: "t2".into() };
        assert_eq!(missing.to_string(), "device t2 not found");
        assert_eq!(missing.as_label(), "device_not_found");
    }
}
