//! Timer service: runs a [`TimerEngine`] on the tokio event loop.
//!
//! User commands, ticks and deferred tasks all arrive on one channel and are
//! handled one at a time, so engine operations never interleave.

use anyhow::{anyhow, Context, Result};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use super::scheduler::{EngineInput, Scheduler, TokioScheduler};
use super::timer::{TimerEngine, TimerEvent};
use crate::i18n::Locale;
use crate::notification::NotificationDispatcher;
use crate::types::{DurationInput, TimerConfig, TimerSnapshot};

/// A request from the presentation layer.
#[derive(Debug)]
pub enum TimerCommand {
    /// Start or resume
    Start,
    /// Pause
    Pause,
    /// Start when stopped, pause when running
    Toggle,
    /// Back to Idle
    Reset,
    /// Change the countdown length
    SetDuration(DurationInput),
    /// Change the notification volume policy
    ToggleLoud(bool),
    /// Change the language
    SetLocale(Locale),
    /// Reply with a snapshot
    Snapshot(oneshot::Sender<TimerSnapshot>),
    /// Stop the service
    Shutdown,
}

// ============================================================================
// TimerService
// ============================================================================

/// Owns the engine and its input channel.
pub struct TimerService<D> {
    engine: TimerEngine<D, TokioScheduler>,
    inputs: mpsc::UnboundedReceiver<EngineInput>,
}

impl<D: NotificationDispatcher> TimerService<D> {
    /// Creates a service, a handle for sending commands, and the event stream.
    pub fn new(
        config: TimerConfig,
        dispatcher: D,
    ) -> (Self, TimerHandle, mpsc::UnboundedReceiver<TimerEvent>) {
        let (input_tx, inputs) = mpsc::unbounded_channel();
        let (event_tx, events) = mpsc::unbounded_channel();

        let scheduler = TokioScheduler::new(input_tx.clone());
        let engine = TimerEngine::new(config, dispatcher, scheduler, event_tx);

        (
            Self { engine, inputs },
            TimerHandle { inputs: input_tx },
            events,
        )
    }

    /// Requests permission, then processes inputs until [`TimerCommand::Shutdown`].
    ///
    /// Returns the final snapshot.
    pub async fn run(mut self) -> TimerSnapshot {
        self.engine.initialize().await;

        while let Some(input) = self.inputs.recv().await {
            match input {
                EngineInput::Tick(id) => self.engine.tick(id).await,
                EngineInput::Deferred(task) => self.engine.run_deferred(task).await,
                EngineInput::Command(TimerCommand::Shutdown) => {
                    info!("Timer service shutting down");
                    break;
                }
                EngineInput::Command(command) => self.handle_command(command).await,
            }
        }

        self.engine.scheduler_mut().stop_ticking();
        self.engine.snapshot()
    }

    async fn handle_command(&mut self, command: TimerCommand) {
        debug!(?command, "Handling command");
        match command {
            TimerCommand::Start => {
                self.engine.start();
            }
            TimerCommand::Pause => {
                self.engine.pause();
            }
            TimerCommand::Toggle => {
                self.engine.toggle();
            }
            TimerCommand::Reset => self.engine.reset(),
            TimerCommand::SetDuration(input) => {
                self.engine.set_duration(input);
            }
            TimerCommand::ToggleLoud(enabled) => self.engine.toggle_loud(enabled),
            TimerCommand::SetLocale(locale) => {
                self.engine.set_locale(locale).await;
            }
            TimerCommand::Snapshot(reply) => {
                // The requester may have given up waiting.
                let _ = reply.send(self.engine.snapshot());
            }
            TimerCommand::Shutdown => {}
        }
    }
}

// ============================================================================
// TimerHandle
// ============================================================================

/// Cloneable sender for timer commands.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    inputs: mpsc::UnboundedSender<EngineInput>,
}

impl TimerHandle {
    fn send(&self, command: TimerCommand) -> Result<()> {
        self.inputs
            .send(EngineInput::Command(command))
            .map_err(|_| anyhow!("timer service is not running"))
    }

    pub fn start(&self) -> Result<()> {
        self.send(TimerCommand::Start)
    }

    pub fn pause(&self) -> Result<()> {
        self.send(TimerCommand::Pause)
    }

    pub fn toggle(&self) -> Result<()> {
        self.send(TimerCommand::Toggle)
    }

    pub fn reset(&self) -> Result<()> {
        self.send(TimerCommand::Reset)
    }

    /// Requests a duration change; invalid input is ignored by the engine.
    pub fn set_duration(&self, input: impl Into<DurationInput>) -> Result<()> {
        self.send(TimerCommand::SetDuration(input.into()))
    }

    pub fn toggle_loud(&self, enabled: bool) -> Result<()> {
        self.send(TimerCommand::ToggleLoud(enabled))
    }

    pub fn set_locale(&self, locale: Locale) -> Result<()> {
        self.send(TimerCommand::SetLocale(locale))
    }

    /// Fetches the current snapshot.
    pub async fn snapshot(&self) -> Result<TimerSnapshot> {
        let (reply, response) = oneshot::channel();
        self.send(TimerCommand::Snapshot(reply))?;
        response
            .await
            .context("Timer service stopped before answering")
    }

    /// Asks the service to stop after the commands already queued.
    pub fn shutdown(&self) -> Result<()> {
        self.send(TimerCommand::Shutdown)
    }
}
