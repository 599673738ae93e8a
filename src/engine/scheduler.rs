//! Timer scheduling for the engine.
//!
//! The engine never sleeps itself. It asks a [`Scheduler`] for two things:
//!
//! - a recurring tick, held in a single slot. Arming a new tick cancels the
//!   previous one, and every tick carries the [`TickId`] of the arming that
//!   produced it so late ticks from a cancelled generation can be ignored.
//! - one-shot delayed tasks. These are fire-and-forget: they cannot be
//!   cancelled, so each [`DeferredTask`] carries enough context for the
//!   engine to recognise it as stale.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Duration, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use super::service::TimerCommand;
use crate::i18n::Locale;

/// Countdown granularity.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// Tokens
// ============================================================================

/// Identity of one armed recurring tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickId(u64);

impl TickId {
    /// Creates a tick id for the given generation.
    pub fn new(generation: u64) -> Self {
        Self(generation)
    }

    /// Returns the generation number.
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// A one-shot callback scheduled by the expiry handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Send the "good to go" notification.
    ///
    /// Volume and language are captured when the cycle expires.
    FollowUp {
        /// Use the noisy dispatch method
        noisy: bool,
        /// Language to render in
        locale: Locale,
    },
    /// Clear the expiry guard and start the next cycle.
    RestartCycle {
        /// Reset epoch at the time of expiry
        epoch: u64,
    },
}

/// Everything the engine's event loop can receive.
#[derive(Debug)]
pub enum EngineInput {
    /// A recurring tick fired
    Tick(TickId),
    /// A one-shot delay elapsed
    Deferred(DeferredTask),
    /// A user command arrived
    Command(TimerCommand),
}

// ============================================================================
// Scheduler
// ============================================================================

/// Source of ticks and delayed callbacks for the engine.
pub trait Scheduler {
    /// Arms the recurring tick, cancelling any tick already armed.
    fn start_ticking(&mut self, period: Duration) -> TickId;

    /// Cancels the recurring tick, if any.
    fn stop_ticking(&mut self);

    /// Delivers `task` back to the engine after `delay`.
    fn schedule(&mut self, delay: Duration, task: DeferredTask);
}

// ============================================================================
// TokioScheduler
// ============================================================================

/// Scheduler backed by tokio tasks that post into the engine's input channel.
#[derive(Debug)]
pub struct TokioScheduler {
    inputs: mpsc::UnboundedSender<EngineInput>,
    ticker: Option<JoinHandle<()>>,
    generation: u64,
}

impl TokioScheduler {
    /// Creates a scheduler that posts to `inputs`.
    pub fn new(inputs: mpsc::UnboundedSender<EngineInput>) -> Self {
        Self {
            inputs,
            ticker: None,
            generation: 0,
        }
    }

    /// Returns true if a recurring tick is armed.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }
}

impl Scheduler for TokioScheduler {
    fn start_ticking(&mut self, period: Duration) -> TickId {
        self.generation += 1;
        let id = TickId::new(self.generation);
        let inputs = self.inputs.clone();

        let handle = tokio::spawn(async move {
            // The first tick lands one full period after arming.
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if inputs.send(EngineInput::Tick(id)).is_err() {
                    trace!("Engine input closed, ticker exiting");
                    break;
                }
            }
        });

        if let Some(previous) = self.ticker.replace(handle) {
            previous.abort();
        }
        debug!(generation = id.generation(), "Tick armed");
        id
    }

    fn stop_ticking(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            debug!(generation = self.generation, "Tick cancelled");
        }
    }

    fn schedule(&mut self, delay: Duration, task: DeferredTask) {
        let inputs = self.inputs.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            if inputs.send(EngineInput::Deferred(task)).is_err() {
                trace!(?task, "Engine input closed, deferred task dropped");
            }
        });
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.stop_ticking();
    }
}

// ============================================================================
// ManualScheduler
// ============================================================================

/// Scheduler that only records requests; tests drive time by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    generation: u64,
    active: Option<TickId>,
    scheduled: Vec<(Duration, DeferredTask)>,
    arm_count: u32,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently armed tick.
    #[must_use]
    pub fn active(&self) -> Option<TickId> {
        self.active
    }

    /// Returns how many times a tick has been armed.
    #[must_use]
    pub fn arm_count(&self) -> u32 {
        self.arm_count
    }

    /// Returns the pending one-shot tasks in scheduling order.
    #[must_use]
    pub fn scheduled(&self) -> &[(Duration, DeferredTask)] {
        &self.scheduled
    }

    /// Removes and returns the pending one-shot tasks.
    pub fn take_scheduled(&mut self) -> Vec<(Duration, DeferredTask)> {
        std::mem::take(&mut self.scheduled)
    }
}

impl Scheduler for ManualScheduler {
    fn start_ticking(&mut self, _period: Duration) -> TickId {
        self.generation += 1;
        self.arm_count += 1;
        let id = TickId::new(self.generation);
        self.active = Some(id);
        id
    }

    fn stop_ticking(&mut self) {
        self.active = None;
    }

    fn schedule(&mut self, delay: Duration, task: DeferredTask) {
        self.scheduled.push((delay, task));
    }
}
