//! Notification content construction.
//!
//! This module provides the platform-shaped [`Notification`] payload handed
//! to a backend, and a builder with a fluent API for creating it.

use uuid::Uuid;

use super::Platform;

/// Maximum length for notification bodies.
const MAX_BODY_LENGTH: usize = 240;

/// Which dispatcher operation produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Standard-priority expiry notification
    Standard,
    /// Attention-getting expiry notification
    Noisy,
    /// Delayed "good to go" notification
    FollowUp,
}

/// A fully built notification, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Unique identifier
    pub id: Uuid,
    /// Platform the notification was shaped for
    pub platform: Platform,
    /// Dispatcher operation that produced it
    pub kind: NotificationKind,
    /// Title line
    pub title: String,
    /// Body text
    pub body: String,
    /// Play a sound on delivery
    pub sound: bool,
    /// Vibrate on delivery
    pub vibrate: bool,
    /// Delivery channel (Android)
    pub channel: Option<&'static str>,
    /// Stay on screen until dismissed (Web)
    pub require_interaction: bool,
}

impl Notification {
    /// Starts building a notification for `platform`.
    #[must_use]
    pub fn builder(platform: Platform, kind: NotificationKind) -> NotificationBuilder {
        NotificationBuilder::new(platform, kind)
    }
}

/// Builder for constructing a [`Notification`].
pub struct NotificationBuilder {
    notification: Notification,
}

impl NotificationBuilder {
    /// Creates a new builder with an empty title and body.
    #[must_use]
    pub fn new(platform: Platform, kind: NotificationKind) -> Self {
        Self {
            notification: Notification {
                id: Uuid::new_v4(),
                platform,
                kind,
                title: String::new(),
                body: String::new(),
                sound: false,
                vibrate: false,
                channel: None,
                require_interaction: false,
            },
        }
    }

    /// Sets the notification title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.notification.title = title.to_string();
        self
    }

    /// Sets the notification body, sanitized with [`sanitize_body`].
    #[must_use]
    pub fn body(mut self, body: &str) -> Self {
        self.notification.body = sanitize_body(body);
        self
    }

    /// Enables the delivery sound.
    #[must_use]
    pub fn sound(mut self, enabled: bool) -> Self {
        self.notification.sound = enabled;
        self
    }

    /// Enables vibration.
    #[must_use]
    pub fn vibrate(mut self, enabled: bool) -> Self {
        self.notification.vibrate = enabled;
        self
    }

    /// Sets the delivery channel.
    #[must_use]
    pub fn channel(mut self, channel: &'static str) -> Self {
        self.notification.channel = Some(channel);
        self
    }

    /// Keeps the notification on screen until the user dismisses it.
    #[must_use]
    pub fn require_interaction(mut self, enabled: bool) -> Self {
        self.notification.require_interaction = enabled;
        self
    }

    /// Builds and returns the notification.
    #[must_use]
    pub fn build(self) -> Notification {
        self.notification
    }
}

/// Truncates a body to the maximum length and drops control characters.
pub fn sanitize_body(body: &str) -> String {
    body.chars()
        .filter(|c| !c.is_control())
        .take(MAX_BODY_LENGTH)
        .collect()
}
