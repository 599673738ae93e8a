//! Web (desktop browser-like) dispatcher variant.

use tracing::{debug, warn};

use super::backend::NotificationBackend;
use super::content::{Notification, NotificationKind};
use super::{deliver_best_effort, request_permission_best_effort, NotificationDispatcher, Platform};
use crate::i18n::{translate, Locale};

/// Shapes notifications for desktop-style notification APIs.
///
/// If the backend reports no notification support, the dispatcher logs the
/// translated `unsupportedBrowser` message on initialization and every send
/// becomes a no-op.
#[derive(Debug)]
pub struct WebDispatcher<B> {
    backend: B,
    locale: Locale,
    granted: bool,
    supported: bool,
}

impl<B: NotificationBackend> WebDispatcher<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        let supported = backend.is_supported();
        Self {
            backend,
            locale: Locale::default(),
            granted: false,
            supported,
        }
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns false if the backend cannot show notifications.
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    async fn send(&self, notification: Notification) {
        if !self.supported {
            debug!("Web notification dropped: unsupported");
            return;
        }
        if !self.granted {
            debug!("Web notification dropped: permission not granted");
            return;
        }
        deliver_best_effort(&self.backend, notification).await;
    }
}

impl<B: NotificationBackend> NotificationDispatcher for WebDispatcher<B> {
    fn platform(&self) -> Platform {
        Platform::Web
    }

    fn locale(&self) -> Locale {
        self.locale
    }

    async fn initialize(&mut self, locale: Locale) -> bool {
        self.locale = locale;
        if !self.supported {
            warn!("{}", translate(locale, "unsupportedBrowser"));
            self.granted = false;
            return false;
        }
        self.granted = request_permission_best_effort(&self.backend, Platform::Web).await;
        self.granted
    }

    async fn send_notification(&self, message: &str, locale: Locale) {
        let notification = Notification::builder(Platform::Web, NotificationKind::Standard)
            .title(translate(locale, "lookAway"))
            .body(message)
            .build();
        self.send(notification).await;
    }

    async fn send_noisy_notification(&self, message: &str, locale: Locale) {
        let notification = Notification::builder(Platform::Web, NotificationKind::Noisy)
            .title(translate(locale, "noisyReminderTitle"))
            .body(message)
            .sound(true)
            .require_interaction(true)
            .build();
        self.send(notification).await;
    }

    async fn send_after_notification(&self, message: &str, locale: Locale) {
        let notification = Notification::builder(Platform::Web, NotificationKind::FollowUp)
            .title(translate(locale, "reminderTitle"))
            .body(message)
            .build();
        self.send(notification).await;
    }
}
