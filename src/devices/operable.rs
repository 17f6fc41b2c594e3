//! # Device capability set.
//!
//! [`Operable`] is the contract every toaster variant implements: power
//! control and a status projection. [`Communicable`] adds local message
//! logging (there is no wire protocol; messages only become events).
//!
//! [`ToasterSnapshot`] is the typed status; its `Display` is the status line:
//! ```text
//! Toaster t1 | powered=true | temp=24°C | mood=CHEERFUL | queue=2 | bread=4
//! ```
//! Variant-specific fields (mood, queue, bread) are omitted for classic toasters.

use std::fmt;

use crate::devices::Mood;

/// Power control and status, shared by all toaster variants.
pub trait Operable: Send + Sync {
    /// Returns the unique device id.
    fn id(&self) -> &str;

    /// Turns the device on.
    fn power_on(&self);

    /// Turns the device off.
    fn power_off(&self);

    /// Returns a per-field snapshot of current state.
    ///
    /// Safe to call while the worker loop runs; fields may be racy but never torn.
    fn snapshot(&self) -> ToasterSnapshot;

    /// Returns the human-readable status line.
    fn status(&self) -> String {
        self.snapshot().to_string()
    }
}

/// Local message log for devices that "talk".
pub trait Communicable {
    /// Records an outgoing message.
    fn send_message(&self, msg: &str);

    /// Records an incoming message.
    fn receive_message(&self, msg: &str);
}

/// Point-in-time view of a toaster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToasterSnapshot {
    /// Device id.
    pub id: String,
    /// Power state.
    pub powered: bool,
    /// Temperature in °C.
    pub temperature: i32,
    /// Current mood (smart toasters only).
    pub mood: Option<Mood>,
    /// Jobs waiting in the mailbox (smart toasters only).
    pub queued: Option<usize>,
    /// Bread left (smart toasters only).
    pub bread: Option<u32>,
}

impl fmt::Display for ToasterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Toaster {} | powered={} | temp={}°C",
            self.id, self.powered, self.temperature
        )?;
        if let Some(mood) = self.mood {
            write!(f, " | mood={mood}")?;
        }
        if let Some(queued) = self.queued {
            write!(f, " | queue={queued}")?;
        }
        if let Some(bread) = self.bread {
            write!(f, " | bread={bread}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_status_line() {
        let snap = ToasterSnapshot {
            id: "v1".into(),
            powered: false,
            temperature: 20,
            mood: None,
            queued: None,
            bread: None,
        };
        assert_eq!(snap.to_string(), "Toaster v1 | powered=false | temp=20°C");
    }

    #[test]
    fn test_worker_status_line_order() {
        let snap = ToasterSnapshot {
            id: "t1".into(),
            powered: true,
            temperature: 24,
            mood: Some(Mood::Grumpy),
            queued: Some(2),
            bread: Some(4),
        };
        assert_eq!(
            snap.to_string(),
            "Toaster t1 | powered=true | temp=24°C | mood=GRUMPY | queue=2 | bread=4"
        );
    }
}
