//! Sound system error types.
//!
//! Audio is optional: every error here leads to a logged warning and a
//! silent notification, never to a failed timer cycle.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Failed to create the audio output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// Generic sound playback error.
    #[error("sound playback failed: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "connect an audio output device",
            Self::StreamError(_) => "check the audio settings",
            Self::PlaybackError(_) => "restart the application",
        }
    }
}
