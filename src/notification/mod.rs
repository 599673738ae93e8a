//! Notification dispatch.
//!
//! The timer engine talks to a single [`NotificationDispatcher`], chosen
//! once at startup for the platform the process runs on:
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────────┐     ┌─────────────────────┐
//! │ TimerEngine  │────▶│ NotificationDispatcher│────▶│ NotificationBackend │
//! └──────────────┘     │  Ios / Android / Web │     │ Terminal / Mock     │
//!                      └──────────────────────┘     └─────────────────────┘
//! ```
//!
//! Dispatcher operations never fail. Backend errors are logged and the
//! notification is dropped; permission problems surface only as the
//! boolean returned by [`NotificationDispatcher::initialize`].
//!
//! # Example
//!
//! ```rust
//! use eyerest::i18n::Locale;
//! use eyerest::notification::{
//!     NotificationDispatcher, Platform, PlatformDispatcher, TerminalBackend,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut dispatcher = PlatformDispatcher::new(Platform::Web, TerminalBackend::silent());
//! let granted = dispatcher.initialize(Locale::En).await;
//! assert!(granted);
//! dispatcher.send_notification("20 minutes 0 seconds completed", Locale::En).await;
//! # }
//! ```

mod android;
mod backend;
mod content;
pub mod error;
mod ios;
mod request;
mod web;

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

pub use self::android::{AndroidDispatcher, LOUD_REMINDER_CHANNEL, REMINDER_CHANNEL};
pub use self::backend::{
    MockNotificationBackend, MockPermission, NotificationBackend, TerminalBackend,
};
pub use self::content::{sanitize_body, Notification, NotificationBuilder, NotificationKind};
pub use self::error::NotificationError;
pub use self::ios::IosDispatcher;
pub use self::request::NotificationRequest;
pub use self::web::WebDispatcher;

use crate::i18n::Locale;

// ============================================================================
// Platform
// ============================================================================

/// Platform family used to pick a dispatcher variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// iOS and iPadOS
    Ios,
    /// Android
    Android,
    /// Browsers and desktop systems
    Web,
}

impl Platform {
    /// Detects the platform the binary was built for.
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else {
            Platform::Web
        }
    }

    /// Returns the string representation of the platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Web => "web",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = NotificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "web" | "desktop" => Ok(Platform::Web),
            other => Err(NotificationError::InvalidInput(format!(
                "unknown platform: {}",
                other
            ))),
        }
    }
}

// ============================================================================
// NotificationDispatcher
// ============================================================================

/// Capability the timer engine uses to notify the user.
///
/// Implementations must swallow every platform failure; none of these
/// operations report errors to the caller.
#[allow(async_fn_in_trait)]
pub trait NotificationDispatcher {
    /// Platform this dispatcher shapes notifications for.
    fn platform(&self) -> Platform;

    /// Locale passed to the most recent [`initialize`](Self::initialize).
    fn locale(&self) -> Locale;

    /// Requests permission and records `locale`.
    ///
    /// Returns whether notifications were granted; denial and failure both
    /// yield `false`.
    async fn initialize(&mut self, locale: Locale) -> bool;

    /// Sends a standard-priority notification.
    async fn send_notification(&self, message: &str, locale: Locale);

    /// Sends an attention-getting notification (sound, vibration).
    async fn send_noisy_notification(&self, message: &str, locale: Locale);

    /// Sends the delayed follow-up notification.
    async fn send_after_notification(&self, message: &str, locale: Locale);
}

/// The dispatcher variant selected for this process.
#[derive(Debug)]
pub enum PlatformDispatcher<B> {
    /// iOS variant
    Ios(IosDispatcher<B>),
    /// Android variant
    Android(AndroidDispatcher<B>),
    /// Web variant
    Web(WebDispatcher<B>),
}

impl<B: NotificationBackend> PlatformDispatcher<B> {
    /// Creates the variant for `platform` on top of `backend`.
    #[must_use]
    pub fn new(platform: Platform, backend: B) -> Self {
        debug!("Selected {} notification dispatcher", platform);
        match platform {
            Platform::Ios => Self::Ios(IosDispatcher::new(backend)),
            Platform::Android => Self::Android(AndroidDispatcher::new(backend)),
            Platform::Web => Self::Web(WebDispatcher::new(backend)),
        }
    }

    /// Creates the variant for the detected platform.
    #[must_use]
    pub fn detect(backend: B) -> Self {
        Self::new(Platform::detect(), backend)
    }
}

impl<B: NotificationBackend> NotificationDispatcher for PlatformDispatcher<B> {
    fn platform(&self) -> Platform {
        match self {
            Self::Ios(d) => d.platform(),
            Self::Android(d) => d.platform(),
            Self::Web(d) => d.platform(),
        }
    }

    fn locale(&self) -> Locale {
        match self {
            Self::Ios(d) => d.locale(),
            Self::Android(d) => d.locale(),
            Self::Web(d) => d.locale(),
        }
    }

    async fn initialize(&mut self, locale: Locale) -> bool {
        match self {
            Self::Ios(d) => d.initialize(locale).await,
            Self::Android(d) => d.initialize(locale).await,
            Self::Web(d) => d.initialize(locale).await,
        }
    }

    async fn send_notification(&self, message: &str, locale: Locale) {
        match self {
            Self::Ios(d) => d.send_notification(message, locale).await,
            Self::Android(d) => d.send_notification(message, locale).await,
            Self::Web(d) => d.send_notification(message, locale).await,
        }
    }

    async fn send_noisy_notification(&self, message: &str, locale: Locale) {
        match self {
            Self::Ios(d) => d.send_noisy_notification(message, locale).await,
            Self::Android(d) => d.send_noisy_notification(message, locale).await,
            Self::Web(d) => d.send_noisy_notification(message, locale).await,
        }
    }

    async fn send_after_notification(&self, message: &str, locale: Locale) {
        match self {
            Self::Ios(d) => d.send_after_notification(message, locale).await,
            Self::Android(d) => d.send_after_notification(message, locale).await,
            Self::Web(d) => d.send_after_notification(message, locale).await,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

async fn deliver_best_effort<B: NotificationBackend>(backend: &B, notification: Notification) {
    if let Err(e) = backend.deliver(&notification).await {
        warn!(
            platform = %notification.platform,
            "Notification dropped: {} ({})",
            e,
            e.suggestion()
        );
    }
}

async fn request_permission_best_effort<B: NotificationBackend>(
    backend: &B,
    platform: Platform,
) -> bool {
    match backend.request_permission().await {
        Ok(true) => true,
        Ok(false) => {
            warn!(%platform, "Notification permission denied");
            false
        }
        Err(e) => {
            warn!(%platform, "Notification permission request failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_platform_from_str() {
        assert_eq!("ios".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("Android".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!("desktop".parse::<Platform>().unwrap(), Platform::Web);
        assert!("symbian".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_detect_on_host() {
        // Test hosts are never iOS or Android.
        assert_eq!(Platform::detect(), Platform::Web);
    }

    #[tokio::test]
    async fn test_platform_dispatcher_selects_variant() {
        for platform in [Platform::Ios, Platform::Android, Platform::Web] {
            let backend = Arc::new(MockNotificationBackend::new());
            let mut dispatcher = PlatformDispatcher::new(platform, Arc::clone(&backend));
            assert_eq!(dispatcher.platform(), platform);

            dispatcher.initialize(Locale::Es).await;
            assert_eq!(dispatcher.locale(), Locale::Es);

            dispatcher.send_notification("msg", Locale::Es).await;
            let delivered = backend.delivered();
            assert_eq!(delivered.len(), 1);
            assert_eq!(delivered[0].platform, platform);
        }
    }
}
