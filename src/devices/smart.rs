//! # SmartToaster: the worker device variant.
//!
//! A [`SmartToaster`] owns an unbounded FIFO mailbox of [`Recipe`]s and runs a
//! dedicated background loop ([`ToastActor`](crate::core::actor)) that drains it.
//!
//! ## Lifecycle
//! ```text
//! new()      → powered=false, running=false, mood=CHEERFUL, bread=5, temp=20
//! start()    → running=true, spawn loop        (requires a tokio runtime)
//! enqueue(r) → push to mailbox, return at once
//! stop()     → running=false, signal loop      (does not wait)
//! shutdown() → stop() + await every loop        (loop has observably exited)
//! ```
//!
//! ## Rules
//! - Calling `start()` while running spawns an additional loop. Callers must not
//!   double-start; the extra loop waits on the mailbox lock and is still
//!   reached by `stop()`.
//! - Job outcomes are only reported as events on the device's [`Bus`].
//!
//! ## Example
//! ```rust
//! use toastnet::{Bus, DeviceConfig, Operable, Recipe, SmartToaster};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let toaster = SmartToaster::new("t1", Bus::default(), DeviceConfig::default());
//! toaster.power_on();
//! toaster.start();
//! toaster.enqueue(Recipe::new("Sourdough", 5, 1));
//! println!("{}", toaster.status());
//! toaster.shutdown().await;
//! # }
//! ```

use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use rand::{SeedableRng, rngs::StdRng};
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        actor::{Mailbox, ToastActor, WorkerExit},
        config::DeviceConfig,
        state::DeviceCore,
    },
    devices::{Communicable, Mood, Operable, ToasterSnapshot},
    events::{Bus, Event, EventKind},
    recipe::Recipe,
};

/// Handle to one spawned loop.
struct Worker {
    stop: CancellationToken,
    join: JoinHandle<WorkerExit>,
}

/// Toaster with a job mailbox and a background worker.
pub struct SmartToaster {
    core: Arc<DeviceCore>,
    tx: mpsc::UnboundedSender<Recipe>,
    mailbox: Arc<Mutex<Mailbox>>,
    workers: StdMutex<Vec<Worker>>,
}

impl SmartToaster {
    /// Creates a powered-off, stopped toaster.
    ///
    /// The drift RNG is seeded from `cfg.seed`, or from OS entropy when unset.
    pub fn new(id: impl Into<Arc<str>>, bus: Bus, cfg: DeviceConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(id, bus, cfg, rng)
    }

    /// Creates a toaster with an explicit drift RNG.
    pub fn with_rng(id: impl Into<Arc<str>>, bus: Bus, cfg: DeviceConfig, rng: StdRng) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            core: Arc::new(DeviceCore::new(id.into(), cfg, bus)),
            tx,
            mailbox: Arc::new(Mutex::new(Mailbox { rx, rng })),
            workers: StdMutex::new(Vec::new()),
        }
    }

    /// Spawns the worker loop.
    ///
    /// Must be called inside a tokio runtime. Do not call while already running.
    pub fn start(&self) {
        let stop = CancellationToken::new();
        self.core.state.set_running(true);

        let actor = ToastActor::new(Arc::clone(&self.core), Arc::clone(&self.mailbox));
        let join = tokio::spawn(actor.run(stop.clone()));
        {
            let mut workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
            workers.retain(|w| !w.join.is_finished());
            workers.push(Worker { stop, join });
        }

        self.publish(Event::new(EventKind::WorkerStarted));
    }

    /// Signals every loop to exit; returns without waiting.
    ///
    /// An idle loop wakes immediately; one with a job in flight exits after
    /// its current step.
    pub fn stop(&self) {
        self.core.state.set_running(false);
        {
            let workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
            for w in workers.iter() {
                w.stop.cancel();
            }
        }
        self.publish(Event::new(EventKind::WorkerStopped));
    }

    /// Stops and awaits every spawned loop.
    ///
    /// A loop that panicked is reported as `WorkerDead` with reason `worker_panic`.
    pub async fn shutdown(&self) -> Vec<WorkerExit> {
        self.stop();
        self.join_all().await
    }

    /// Awaits every spawned loop. Callers must `stop()` first.
    pub(crate) async fn join_all(&self) -> Vec<WorkerExit> {
        let workers: Vec<Worker> = {
            let mut guard = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
            guard.drain(..).collect()
        };

        let mut exits = Vec::with_capacity(workers.len());
        for w in workers {
            match w.join.await {
                Ok(exit) => exits.push(exit),
                Err(_je) => {
                    self.publish(Event::new(EventKind::WorkerDead).with_reason("worker_panic"));
                    exits.push(WorkerExit::Fatal);
                }
            }
        }
        exits
    }

    /// True between `start()` and `stop()` (or a fatal job error).
    pub fn is_running(&self) -> bool {
        self.core.state.is_running()
    }

    /// Appends a recipe to the mailbox; never blocks.
    pub fn enqueue(&self, recipe: Recipe) {
        self.core.state.job_queued();
        self.publish(Event::new(EventKind::JobQueued).with_recipe(&recipe));
        if self.tx.send(recipe).is_err() {
            // receiver lives in `self.mailbox`, so this only happens mid-drop
            self.core.state.job_dequeued();
        }
    }

    /// Adds `n` slices of bread (no upper bound).
    pub fn refill_bread(&self, n: u32) {
        let total = self.core.state.refill(n);
        self.publish(
            Event::new(EventKind::BreadRefilled)
                .with_amount(n)
                .with_bread(total),
        );
    }

    /// Overrides the current mood, bypassing drift.
    pub fn set_mood(&self, mood: Mood) {
        self.core.state.set_mood(mood);
        self.publish(Event::new(EventKind::MoodSet).with_mood(mood));
    }

    /// Current mood.
    pub fn mood(&self) -> Mood {
        self.core.state.mood()
    }

    /// Bread left.
    pub fn bread(&self) -> u32 {
        self.core.state.bread()
    }

    /// Current temperature (°C).
    pub fn temperature(&self) -> i32 {
        self.core.state.temperature()
    }

    /// Jobs waiting in the mailbox (excludes a job in flight).
    pub fn queue_len(&self) -> usize {
        self.core.state.queued()
    }

    /// Power state.
    pub fn is_powered(&self) -> bool {
        self.core.state.is_powered()
    }

    fn publish(&self, ev: Event) {
        self.core.bus.publish_from(&self.core.id, ev);
    }
}

impl Operable for SmartToaster {
    fn id(&self) -> &str {
        &self.core.id
    }

    fn power_on(&self) {
        self.core.state.set_powered(true);
    }

    fn power_off(&self) {
        self.core.state.set_powered(false);
    }

    fn snapshot(&self) -> ToasterSnapshot {
        let state = &self.core.state;
        ToasterSnapshot {
            id: self.core.id.to_string(),
            powered: state.is_powered(),
            temperature: state.temperature(),
            mood: Some(state.mood()),
            queued: Some(state.queued()),
            bread: Some(state.bread()),
        }
    }
}

impl Communicable for SmartToaster {
    fn send_message(&self, msg: &str) {
        self.publish(Event::new(EventKind::MessageSent).with_reason(msg));
    }

    fn receive_message(&self, msg: &str) {
        self.publish(Event::new(EventKind::MessageReceived).with_reason(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::MoodDrift;
    use std::time::Duration;
    use tokio::sync::broadcast;
    use tokio::time;

    fn quiet_cfg() -> DeviceConfig {
        DeviceConfig {
            drift: MoodDrift::disabled(),
            seed: Some(7),
            ..DeviceConfig::default()
        }
    }

    fn toaster(cfg: DeviceConfig) -> (SmartToaster, broadcast::Receiver<Event>) {
        let bus = Bus::new(1024);
        let rx = bus.subscribe();
        let t = SmartToaster::new("t1", bus, cfg);
        t.power_on();
        (t, rx)
    }

    /// Receives until an event of `kind` arrives.
    async fn next_of(rx: &mut broadcast::Receiver<Event>, kind: EventKind) -> Event {
        loop {
            let ev = rx.recv().await.unwrap();
            if ev.kind == kind {
                return ev;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_state() {
        let t = SmartToaster::new("t1", Bus::default(), DeviceConfig::default());
        assert!(!t.is_powered());
        assert!(!t.is_running());
        assert_eq!(t.mood(), Mood::Cheerful);
        assert_eq!(t.bread(), 5);
        assert_eq!(t.temperature(), 20);
        assert_eq!(t.queue_len(), 0);
        assert_eq!(
            t.status(),
            "Toaster t1 | powered=false | temp=20°C | mood=CHEERFUL | queue=0 | bread=5"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_enqueue_does_not_block_without_worker() {
        let (t, _rx) = toaster(quiet_cfg());
        t.enqueue(Recipe::new("a", 5, 1));
        t.enqueue(Recipe::new("b", 5, 1));
        assert_eq!(t.queue_len(), 2);
        assert_eq!(t.bread(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_jobs_run_in_fifo_order() {
        let (t, mut rx) = toaster(quiet_cfg());
        t.start();
        for name in ["first", "second", "third"] {
            t.enqueue(Recipe::new(name, 5, 1));
        }

        let mut finished = Vec::new();
        while finished.len() < 3 {
            let ev = next_of(&mut rx, EventKind::JobFinished).await;
            finished.push(ev.recipe.unwrap().to_string());
        }
        assert_eq!(
            finished,
            vec![
                "first (lvl 5, 1s)",
                "second (lvl 5, 1s)",
                "third (lvl 5, 1s)"
            ]
        );
        assert_eq!(t.bread(), 2);
        assert_eq!(t.queue_len(), 0);
        t.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_bread_failure_keeps_worker_alive() {
        let (t, mut rx) = toaster(DeviceConfig {
            initial_bread: 0,
            ..quiet_cfg()
        });
        t.start();
        t.enqueue(Recipe::new("dry", 5, 1));

        let failed = next_of(&mut rx, EventKind::JobFailed).await;
        assert_eq!(failed.reason.as_deref(), Some("t1 has no bread"));
        assert_eq!(t.bread(), 0);
        assert_eq!(t.temperature(), 20);
        assert!(t.is_running());

        t.refill_bread(1);
        t.enqueue(Recipe::new("fresh", 5, 1));
        let done = next_of(&mut rx, EventKind::JobFinished).await;
        assert_eq!(done.bread, Some(0));
        t.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_overheat_failure_keeps_worker_alive() {
        let (t, mut rx) = toaster(DeviceConfig {
            initial_temperature: 221,
            ..quiet_cfg()
        });
        t.start();
        t.enqueue(Recipe::new("scorch", 5, 3));

        let failed = next_of(&mut rx, EventKind::JobFailed).await;
        assert_eq!(failed.temperature, Some(221));
        assert_eq!(t.bread(), 5);
        assert_eq!(t.temperature(), 221);
        assert!(t.is_running());
        t.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_powered_off_job_kills_worker() {
        let (t, mut rx) = toaster(quiet_cfg());
        t.power_off();
        t.start();
        t.enqueue(Recipe::new("cold", 5, 1));

        let dead = next_of(&mut rx, EventKind::WorkerDead).await;
        assert_eq!(dead.reason.as_deref(), Some("toaster t1 is off"));
        assert!(!t.is_running());
        assert_eq!(t.shutdown().await, vec![WorkerExit::Fatal]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_observed_within_one_poll_interval() {
        let (t, _rx) = toaster(quiet_cfg());
        t.start();
        time::sleep(Duration::from_millis(2_500)).await;

        let started = time::Instant::now();
        let exits = t.shutdown().await;
        assert_eq!(exits, vec![WorkerExit::Stopped]);
        assert!(started.elapsed() <= Duration::from_secs(1));
        assert!(!t.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_interrupts_a_long_idle_wait() {
        let (t, _rx) = toaster(DeviceConfig {
            poll_interval: Duration::from_secs(60),
            ..quiet_cfg()
        });
        t.start();
        time::sleep(Duration::from_secs(5)).await;

        // the worker is parked 55s away from its next timeout
        let started = time::Instant::now();
        let exits = t.shutdown().await;
        assert_eq!(exits, vec![WorkerExit::Stopped]);
        assert!(started.elapsed() < Duration::from_millis(1), "{:?}", started.elapsed());
        assert!(!t.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_stop_processes_jobs() {
        let (t, mut rx) = toaster(quiet_cfg());
        t.start();
        t.stop();
        next_of(&mut rx, EventKind::WorkerExited).await;
        time::sleep(Duration::from_secs(1)).await;

        t.start();
        t.enqueue(Recipe::new("again", 5, 1));
        next_of(&mut rx, EventKind::JobFinished).await;
        assert_eq!(t.bread(), 4);
        assert_eq!(t.shutdown().await, vec![WorkerExit::Stopped]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_mid_job_interrupts_without_consuming() {
        let (t, mut rx) = toaster(quiet_cfg());
        t.start();
        t.enqueue(Recipe::new("long", 5, 20));

        next_of(&mut rx, EventKind::JobStarting).await;
        time::sleep(Duration::from_millis(1_250)).await;
        t.stop();

        next_of(&mut rx, EventKind::JobInterrupted).await;
        next_of(&mut rx, EventKind::WorkerExited).await;
        assert_eq!(t.bread(), 5);
        assert!(t.temperature() > 20);
        t.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drift_changes_mood() {
        let (t, mut rx) = toaster(DeviceConfig {
            drift: MoodDrift { percent: 100 },
            ..quiet_cfg()
        });
        t.start();

        let drifted = next_of(&mut rx, EventKind::MoodDrifted).await;
        let mood = drifted.mood.unwrap();
        assert!(Mood::ALL.contains(&mood));
        t.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_mood_and_refill() {
        let (t, mut rx) = toaster(quiet_cfg());
        t.set_mood(Mood::Lazy);
        t.refill_bread(3);
        assert_eq!(t.mood(), Mood::Lazy);
        assert_eq!(t.bread(), 8);

        let set = next_of(&mut rx, EventKind::MoodSet).await;
        assert_eq!(set.message(), "t1 mood set to LAZY");
        let refill = next_of(&mut rx, EventKind::BreadRefilled).await;
        assert_eq!(refill.message(), "t1 refilled +3 -> 8");
    }

    #[tokio::test(start_paused = true)]
    async fn test_messages_are_logged_locally() {
        let (t, mut rx) = toaster(quiet_cfg());
        t.send_message("toast is ready");
        t.receive_message("thanks");

        let sent = next_of(&mut rx, EventKind::MessageSent).await;
        assert_eq!(sent.message(), "t1 sends: toast is ready");
        let got = next_of(&mut rx, EventKind::MessageReceived).await;
        assert_eq!(got.message(), "t1 received: thanks");
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_is_still_stoppable() {
        let (t, _rx) = toaster(quiet_cfg());
        t.start();
        t.start();
        let exits = t.shutdown().await;
        assert_eq!(exits, vec![WorkerExit::Stopped, WorkerExit::Stopped]);
    }
}
