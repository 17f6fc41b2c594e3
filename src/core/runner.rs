//! # Run a single toasting job.
//!
//! Executes one [`Recipe`] against a device's shared state, publishing
//! lifecycle events to the device's [`Bus`](crate::Bus).
//!
//! ## Flow
//! ```text
//! make_toast(recipe)
//!   ├─ !powered           → Err(PoweredOff)      (contract violation)
//!   ├─ bread == 0         → Err(NoBread)         (nothing changed)
//!   ├─ steps = mood.scaled_steps(duration)       (mood read once)
//!   ├─ publish JobStarting
//!   ├─ for each step:
//!   │    ├─ stop requested → Err(Canceled)       (previous step completed)
//!   │    ├─ temp > limit   → Err(Overheat)       (temperature kept)
//!   │    ├─ temp += heat_step
//!   │    └─ sleep(step_duration)
//!   ├─ bread -= 1, temp -= cooldown
//!   └─ publish JobFinished
//! ```
//!
//! ## Rules
//! - Only the worker loop calls this; it is the sole writer of `temperature`.
//! - A step, once begun, always finishes (heat + sleep) before stop is honored.
//! - Failure events are published by the caller, not here.

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::{
    core::state::DeviceCore,
    error::ToastError,
    events::{Event, EventKind},
    recipe::Recipe,
};

/// Executes one job. See module docs for the exact state transitions.
pub(crate) async fn make_toast(
    core: &DeviceCore,
    recipe: &Recipe,
    stop: &CancellationToken,
) -> Result<(), ToastError> {
    let state = &core.state;

    if !state.is_powered() {
        return Err(ToastError::PoweredOff {
            device: core.id.to_string(),
        });
    }
    if state.bread() == 0 {
        return Err(ToastError::NoBread {
            device: core.id.to_string(),
        });
    }

    let mood = state.mood();
    let steps = mood.scaled_steps(recipe.duration_seconds());
    core.bus.publish_from(
        &core.id,
        Event::new(EventKind::JobStarting)
            .with_recipe(recipe)
            .with_mood(mood)
            .with_steps(steps),
    );

    for _ in 0..steps {
        if stop.is_cancelled() {
            return Err(ToastError::Canceled);
        }
        let temperature = state.temperature();
        if temperature > core.cfg.overheat_threshold {
            return Err(ToastError::Overheat {
                device: core.id.to_string(),
                temperature,
            });
        }
        state.add_temperature(core.cfg.heat_step);
        time::sleep(core.cfg.step_duration).await;
    }

    // Refills only add, so the bread checked above is still there.
    let left = state.take_bread().ok_or_else(|| ToastError::NoBread {
        device: core.id.to_string(),
    })?;
    let temperature = state.add_temperature(-core.cfg.cooldown);

    core.bus.publish_from(
        &core.id,
        Event::new(EventKind::JobFinished)
            .with_recipe(recipe)
            .with_bread(left)
            .with_temperature(temperature),
    );
    Ok(())
}
