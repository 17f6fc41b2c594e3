//! # ClassicToaster: the inline baseline variant.
//!
//! No mailbox and no worker: [`ClassicToaster::make_toast`] runs the job on the
//! caller's task and returns when it is done. It has no mood and no bread
//! counter, and its temperature never changes.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::{
    core::state::DeviceState,
    devices::{Operable, ToasterSnapshot},
    error::ToastError,
    events::{Bus, Event, EventKind},
    recipe::Recipe,
};

/// Ambient temperature a classic toaster reports.
const AMBIENT: i32 = 20;

/// Simple toaster that toasts inline.
pub struct ClassicToaster {
    id: Arc<str>,
    bus: Bus,
    state: DeviceState,
    step: Duration,
}

impl ClassicToaster {
    /// Default time slice per duration second.
    pub const STEP: Duration = Duration::from_millis(400);

    /// Creates a powered-off classic toaster.
    pub fn new(id: impl Into<Arc<str>>, bus: Bus) -> Self {
        Self {
            id: id.into(),
            bus,
            state: DeviceState::new(AMBIENT, 0),
            step: Self::STEP,
        }
    }

    /// Overrides the per-step time slice.
    pub fn with_step_duration(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    /// Power state.
    pub fn is_powered(&self) -> bool {
        self.state.is_powered()
    }

    /// Runs one job to completion on the calling task.
    ///
    /// Takes `duration_seconds` steps; mood and bread play no part.
    pub async fn make_toast(&self, recipe: &Recipe) -> Result<(), ToastError> {
        if !self.state.is_powered() {
            return Err(ToastError::PoweredOff {
                device: self.id.to_string(),
            });
        }

        let steps = recipe.duration_seconds();
        self.publish(
            Event::new(EventKind::JobStarting)
                .with_recipe(recipe)
                .with_steps(steps),
        );
        for _ in 0..steps {
            time::sleep(self.step).await;
        }
        self.publish(Event::new(EventKind::JobFinished).with_recipe(recipe));
        Ok(())
    }

    fn publish(&self, ev: Event) {
        self.bus.publish_from(&self.id, ev);
    }
}

impl Operable for ClassicToaster {
    fn id(&self) -> &str {
        &self.id
    }

    fn power_on(&self) {
        self.state.set_powered(true);
    }

    fn power_off(&self) {
        self.state.set_powered(false);
    }

    fn snapshot(&self) -> ToasterSnapshot {
        ToasterSnapshot {
            id: self.id.to_string(),
            powered: self.state.is_powered(),
            temperature: self.state.temperature(),
            mood: None,
            queued: None,
            bread: None,
        }
    }
}
