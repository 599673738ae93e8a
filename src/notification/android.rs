//! Android dispatcher variant.

use tracing::debug;

use super::backend::NotificationBackend;
use super::content::{Notification, NotificationKind};
use super::{deliver_best_effort, request_permission_best_effort, NotificationDispatcher, Platform};
use crate::i18n::{translate, Locale};

/// Channel for standard and follow-up reminders.
pub const REMINDER_CHANNEL: &str = "eye-reminders";

/// High-importance channel for loud reminders.
pub const LOUD_REMINDER_CHANNEL: &str = "eye-reminders-loud";

/// Shapes notifications for Android notification channels.
///
/// Loud reminders go to their own high-importance channel with sound and
/// vibration, since Android fixes importance per channel.
#[derive(Debug)]
pub struct AndroidDispatcher<B> {
    backend: B,
    locale: Locale,
    granted: bool,
}

impl<B: NotificationBackend> AndroidDispatcher<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            locale: Locale::default(),
            granted: false,
        }
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    async fn send(&self, kind: NotificationKind, message: &str, locale: Locale) {
        if !self.granted {
            debug!("Android notification dropped: permission not granted");
            return;
        }

        let noisy = kind == NotificationKind::Noisy;
        let (title_key, channel) = if noisy {
            ("noisyReminderTitle", LOUD_REMINDER_CHANNEL)
        } else {
            ("reminderTitle", REMINDER_CHANNEL)
        };

        let notification = Notification::builder(Platform::Android, kind)
            .title(translate(locale, title_key))
            .body(message)
            .channel(channel)
            .sound(noisy)
            .vibrate(noisy)
            .build();
        deliver_best_effort(&self.backend, notification).await;
    }
}

impl<B: NotificationBackend> NotificationDispatcher for AndroidDispatcher<B> {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn locale(&self) -> Locale {
        self.locale
    }

    async fn initialize(&mut self, locale: Locale) -> bool {
        self.locale = locale;
        self.granted = request_permission_best_effort(&self.backend, Platform::Android).await;
        self.granted
    }

    async fn send_notification(&self, message: &str, locale: Locale) {
        self.send(NotificationKind::Standard, message, locale).await;
    }

    async fn send_noisy_notification(&self, message: &str, locale: Locale) {
        self.send(NotificationKind::Noisy, message, locale).await;
    }

    async fn send_after_notification(&self, message: &str, locale: Locale) {
        self.send(NotificationKind::FollowUp, message, locale).await;
    }
}
