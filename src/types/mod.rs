//! Core data types for the eye-rest timer.
//!
//! This module defines the data structures used for:
//! - Timer phase and state management
//! - Timer configuration with validation
//! - Read-only snapshots handed to the presentation layer
//! - Lenient parsing of user-entered durations

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Duration;

use crate::i18n::Locale;

/// Default countdown length: 20 minutes.
pub const DEFAULT_DURATION_SECONDS: u32 = 20 * 60;

/// Default delay before the "good to go" follow-up notification.
pub const DEFAULT_FOLLOW_UP_DELAY: Duration = Duration::from_secs(20);

/// Default delay between expiry and the automatic restart of the countdown.
pub const DEFAULT_RESTART_DELAY: Duration = Duration::from_secs(1);

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the current phase of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Not counting; remaining time equals the configured duration
    #[default]
    Idle,
    /// Counting down once per second
    Running,
    /// Counting suspended, remaining time preserved
    Paused,
    /// Reached zero; waiting for the automatic restart
    Expired,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Expired => "expired",
        }
    }

    /// Returns the translation key for the phase label.
    pub fn label_key(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "phaseIdle",
            TimerPhase::Running => "phaseRunning",
            TimerPhase::Paused => "phasePaused",
            TimerPhase::Expired => "phaseExpired",
        }
    }

    /// Returns true while a cycle is in progress, including the short
    /// window between expiry and the automatic restart.
    pub fn is_active(&self) -> bool {
        matches!(self, TimerPhase::Running | TimerPhase::Expired)
    }
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Errors produced by [`TimerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The countdown duration must be at least one second.
    #[error("duration must be a positive number of seconds")]
    ZeroDuration,

    /// A scheduling delay was zero.
    #[error("{0} delay must be greater than zero")]
    ZeroDelay(&'static str),
}

/// Configuration for the eye-rest timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Countdown length in seconds
    pub duration_seconds: u32,
    /// Whether expiry notifications use sound and vibration
    pub loud_notifications: bool,
    /// Language for notification text
    pub locale: Locale,
    /// Delay before the follow-up notification
    #[serde(with = "duration_secs")]
    pub follow_up_delay: Duration,
    /// Delay between expiry and the automatic restart
    #[serde(with = "duration_secs")]
    pub restart_delay: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            duration_seconds: DEFAULT_DURATION_SECONDS,
            loud_notifications: false,
            locale: Locale::default(),
            follow_up_delay: DEFAULT_FOLLOW_UP_DELAY,
            restart_delay: DEFAULT_RESTART_DELAY,
        }
    }
}

impl TimerConfig {
    /// Sets the countdown length.
    pub fn with_duration_seconds(mut self, seconds: u32) -> Self {
        self.duration_seconds = seconds;
        self
    }

    /// Sets the notification volume policy.
    pub fn with_loud_notifications(mut self, enabled: bool) -> Self {
        self.loud_notifications = enabled;
        self
    }

    /// Sets the notification language.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Sets the follow-up delay.
    pub fn with_follow_up_delay(mut self, delay: Duration) -> Self {
        self.follow_up_delay = delay;
        self
    }

    /// Sets the restart delay.
    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_seconds == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.follow_up_delay.is_zero() {
            return Err(ConfigError::ZeroDelay("follow-up"));
        }
        if self.restart_delay.is_zero() {
            return Err(ConfigError::ZeroDelay("restart"));
        }
        Ok(())
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use tokio::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Mutable countdown state owned by the timer engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    /// Current phase
    pub phase: TimerPhase,
    /// Seconds left in the current cycle
    pub remaining_seconds: u32,
    /// Configured countdown length
    pub duration_seconds: u32,
    /// Notification volume policy for the next expiry
    pub loud_notifications_enabled: bool,
    /// Whether the notification permission was granted
    pub has_permission: bool,
    /// Active language
    pub locale: Locale,
    /// Number of cycles that reached zero since startup
    pub completed_cycles: u64,
}

impl TimerState {
    /// Creates an idle state with a full countdown.
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            phase: TimerPhase::Idle,
            remaining_seconds: config.duration_seconds,
            duration_seconds: config.duration_seconds,
            loud_notifications_enabled: config.loud_notifications,
            has_permission: false,
            locale: config.locale,
            completed_cycles: 0,
        }
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if the countdown has reached zero.
    pub fn tick(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds == 0
    }

    /// Refills the countdown from the configured duration.
    pub fn refill(&mut self) {
        self.remaining_seconds = self.duration_seconds;
    }

    /// Returns true if the countdown is in progress.
    pub fn is_running(&self) -> bool {
        self.phase.is_active()
    }

    /// Returns a read-only snapshot.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            duration_seconds: self.duration_seconds,
            is_running: self.is_running(),
            has_permission: self.has_permission,
            loud_notifications_enabled: self.loud_notifications_enabled,
            locale: self.locale,
            completed_cycles: self.completed_cycles,
        }
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Point-in-time view of the timer for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Current phase
    pub phase: TimerPhase,
    /// Seconds left in the current cycle
    #[serde(rename = "remainingSeconds")]
    pub remaining_seconds: u32,
    /// Configured countdown length
    #[serde(rename = "durationSeconds")]
    pub duration_seconds: u32,
    /// Whether a cycle is in progress
    #[serde(rename = "isRunning")]
    pub is_running: bool,
    /// Whether notifications are permitted
    #[serde(rename = "hasPermission")]
    pub has_permission: bool,
    /// Notification volume policy
    #[serde(rename = "loudNotificationsEnabled")]
    pub loud_notifications_enabled: bool,
    /// Active language
    pub locale: Locale,
    /// Number of completed cycles
    #[serde(rename = "completedCycles")]
    pub completed_cycles: u64,
}

// ============================================================================
// DurationInput
// ============================================================================

/// A duration as entered by the user: either a number or free text.
#[derive(Debug, Clone, PartialEq)]
pub enum DurationInput {
    /// Numeric input (may be negative or fractional)
    Number(f64),
    /// Text input, parsed leniently
    Text(String),
}

impl DurationInput {
    /// Resolves the input to a positive whole number of seconds.
    ///
    /// Text keeps only its leading integer (`"90s"` is 90, `" 30 "` is 30).
    /// Fractions are truncated. Zero, negative, non-numeric and
    /// out-of-range values yield `None`.
    pub fn to_seconds(&self) -> Option<u32> {
        let value = match self {
            DurationInput::Number(n) if n.is_finite() => n.trunc(),
            DurationInput::Number(_) => return None,
            DurationInput::Text(text) => leading_integer(text)?,
        };

        if value >= 1.0 && value <= f64::from(u32::MAX) {
            Some(value as u32)
        } else {
            None
        }
    }
}

fn leading_integer(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end].parse::<f64>().ok().map(|n| sign * n)
}

impl From<u32> for DurationInput {
    fn from(value: u32) -> Self {
        DurationInput::Number(f64::from(value))
    }
}

impl From<i64> for DurationInput {
    fn from(value: i64) -> Self {
        DurationInput::Number(value as f64)
    }
}

impl From<f64> for DurationInput {
    fn from(value: f64) -> Self {
        DurationInput::Number(value)
    }
}

impl From<&str> for DurationInput {
    fn from(value: &str) -> Self {
        DurationInput::Text(value.to_string())
    }
}

impl From<String> for DurationInput {
    fn from(value: String) -> Self {
        DurationInput::Text(value)
    }
}

// ============================================================================
// Tests
// ============================================================================
