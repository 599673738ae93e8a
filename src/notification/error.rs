//! Notification system error types.
//!
//! These errors never reach the timer engine: dispatcher variants log them
//! and degrade to a no-op. They exist so backends can report what went
//! wrong to the variant that called them.

use thiserror::Error;

/// Errors that can occur while talking to a notification backend.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Failed to request notification permission from the platform.
    #[error("failed to request notification permission: {0}")]
    AuthorizationFailed(String),

    /// Failed to deliver a notification.
    #[error("failed to deliver notification: {0}")]
    SendFailed(String),

    /// Notification permission was denied by the user.
    #[error("notification permission denied")]
    PermissionDenied,

    /// The platform has no notification support at all.
    #[error("notifications are not supported on this platform")]
    Unsupported,

    /// Invalid input provided to the notification system.
    #[error("invalid notification: {0}")]
    InvalidInput(String),
}

impl NotificationError {
    /// Returns true if this error is related to permissions.
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::AuthorizationFailed(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::AuthorizationFailed(_) | Self::PermissionDenied => {
                "allow notifications for this application in the system settings"
            }
            Self::SendFailed(_) => "check that the notification service is running",
            Self::Unsupported => "run on a platform with desktop notification support",
            Self::InvalidInput(_) => "check the notification text",
        }
    }
}
