//! Notification request creation.
//!
//! A [`NotificationRequest`] names a message by translation key plus a list
//! of quantity substitutions, and renders to text in its locale.

use crate::i18n::{translate, Locale};

/// Ephemeral description of a message to send; built per expiry event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Translation key of the trailing message text
    pub message_key: &'static str,
    /// `(unit key, value)` pairs rendered before the message
    pub substitutions: Vec<(&'static str, String)>,
    /// Whether the noisy dispatch variant should be used
    pub noisy: bool,
    /// Language to render in
    pub locale: Locale,
}

impl NotificationRequest {
    /// The "N minutes M seconds completed" message for a finished cycle.
    #[must_use]
    pub fn cycle_completed(duration_seconds: u32, noisy: bool, locale: Locale) -> Self {
        Self {
            message_key: "completed",
            substitutions: vec![
                ("minutes", (duration_seconds / 60).to_string()),
                ("seconds", (duration_seconds % 60).to_string()),
            ],
            noisy,
            locale,
        }
    }

    /// The delayed "you're good to go" message.
    #[must_use]
    pub fn follow_up(noisy: bool, locale: Locale) -> Self {
        Self {
            message_key: "goodToGo",
            substitutions: Vec::new(),
            noisy,
            locale,
        }
    }

    /// Renders the message text in the request's locale.
    #[must_use]
    pub fn render(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.substitutions.len() * 2 + 1);
        for (unit, value) in &self.substitutions {
            parts.push(value.as_str());
            parts.push(translate(self.locale, unit));
        }
        parts.push(translate(self.locale, self.message_key));
        parts.join(" ")
    }
}
