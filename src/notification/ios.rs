//! iOS dispatcher variant.

use tracing::debug;

use super::backend::NotificationBackend;
use super::content::{Notification, NotificationKind};
use super::{deliver_best_effort, request_permission_best_effort, NotificationDispatcher, Platform};
use crate::i18n::{translate, Locale};

/// Shapes notifications the way the iOS notification center expects them.
///
/// Every notification carries the `reminderTitle` title; the noisy variant
/// adds the default sound. The follow-up is a standard notification.
#[derive(Debug)]
pub struct IosDispatcher<B> {
    backend: B,
    locale: Locale,
    granted: bool,
}

impl<B: NotificationBackend> IosDispatcher<B> {
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
            debug!("iOS notification dropped: permission not granted");
            return;
        }

        let notification = Notification::builder(Platform::Ios, kind)
            .title(translate(locale, "reminderTitle"))
            .body(message)
            .sound(kind == NotificationKind::Noisy)
            .build();
        deliver_best_effort(&self.backend, notification).await;
    }
}

impl<B: NotificationBackend> NotificationDispatcher for IosDispatcher<B> {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn locale(&self) -> Locale {
        self.locale
    }

    async fn initialize(&mut self, locale: Locale) -> bool {
        self.locale = locale;
        self.granted = request_permission_best_effort(&self.backend, Platform::Ios).await;
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
