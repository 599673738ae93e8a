//! The countdown engine and the service that drives it.
//!
//! - [`TimerEngine`]: the state machine, generic over dispatcher and scheduler
//! - [`Scheduler`]: recurring ticks and one-shot delays
//! - [`TimerService`]: runs an engine on the tokio event loop behind a
//!   [`TimerHandle`]

mod scheduler;
mod service;
mod timer;

pub use scheduler::{
    DeferredTask, EngineInput, ManualScheduler, Scheduler, TickId, TokioScheduler, TICK_PERIOD,
};
pub use service::{TimerCommand, TimerHandle, TimerService};
pub use timer::{TimerEngine, TimerEvent};
