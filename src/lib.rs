//! eyerest library
//!
//! A 20/20/20 eye-rest reminder: every 20 minutes, look at something 20 feet
//! away for 20 seconds. It includes:
//! - Timer engine with tick-driven expiry and automatic restart
//! - Timer service that runs the engine on the tokio event loop
//! - Platform notification dispatchers (iOS, Android, Web)
//! - Translated notification and UI text
//! - Sound playback for loud notifications
//! - CLI command parsing and display utilities

pub mod cli;
pub mod engine;
pub mod i18n;
pub mod notification;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{DurationInput, TimerConfig, TimerPhase, TimerSnapshot, TimerState};

pub use engine::{
    DeferredTask, ManualScheduler, Scheduler, TickId, TimerEngine, TimerEvent, TimerHandle,
    TimerService, TokioScheduler,
};

pub use i18n::{translate, Locale};

pub use notification::{
    MockNotificationBackend, NotificationBackend, NotificationDispatcher, NotificationError,
    Platform, PlatformDispatcher, TerminalBackend,
};

pub use sound::{MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer};
