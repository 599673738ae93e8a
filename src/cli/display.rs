//! Display utilities for the eyerest CLI.
//!
//! This module provides formatted output for:
//! - Timer status and events
//! - The 20/20/20 rule and the language list
//! - Error messages
//!
//! Text is rendered in the session's locale. The `*_text` functions build
//! the output and the `show_*` functions print it.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::engine::TimerEvent;
use crate::i18n::{available_locales, translate, Locale};
use crate::types::TimerSnapshot;

/// Interactive commands accepted by `eyerest run`.
const SESSION_HELP: &[(&str, &str)] = &[
    ("start", "start or resume the countdown"),
    ("pause", "pause the countdown"),
    ("toggle", "start when stopped, pause when running"),
    ("reset", "stop and refill the countdown"),
    ("set <secs>", "change the countdown length"),
    ("loud on|off", "switch loud notifications"),
    ("lang <code>", "change the notification language"),
    ("status", "show the current status"),
    ("help", "show this list"),
    ("quit", "leave the session"),
];

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Formats seconds as `MM:SS`.
    pub fn clock(total_seconds: u32) -> String {
        let (minutes, seconds) = Self::format_time(total_seconds);
        format!("{:02}:{:02}", minutes, seconds)
    }

    /// Renders the status block for a snapshot.
    pub fn status_text(snapshot: &TimerSnapshot) -> String {
        let locale = snapshot.locale;
        let t = |key: &'static str| translate(locale, key);

        let mut lines = vec![
            t("timerTitle").to_string(),
            "─────────────────────────────".to_string(),
            format!("{}: {}", t("timeRemaining"), Self::clock(snapshot.remaining_seconds)),
            t(snapshot.phase.label_key()).to_string(),
            t(if snapshot.loud_notifications_enabled {
                "loudOn"
            } else {
                "quietOn"
            })
            .to_string(),
        ];
        if snapshot.completed_cycles > 0 {
            lines.push(format!("#{}", snapshot.completed_cycles));
        }
        if !snapshot.has_permission {
            lines.push(format!("! {}", t("permissionWarning")));
        }
        lines.join("\n")
    }

    /// Renders a timer event, or `None` for events not worth a line.
    pub fn event_text(event: &TimerEvent, locale: Locale) -> Option<String> {
        let t = |key: &'static str| translate(locale, key);

        match event {
            TimerEvent::Started { .. } => Some(format!("> {}", t("phaseRunning"))),
            TimerEvent::Paused => Some(format!("|| {}", t("phasePaused"))),
            TimerEvent::Reset => Some(format!("[] {}", t("phaseIdle"))),
            TimerEvent::Tick { remaining_seconds } => (*remaining_seconds > 0
                && remaining_seconds % 60 == 0)
                .then(|| format!("{}: {}", t("timeRemaining"), Self::clock(*remaining_seconds))),
            TimerEvent::Expired { cycle, .. } => {
                Some(format!("* {} (#{})", t("phaseExpired"), cycle))
            }
            TimerEvent::FollowUpSent { .. } => None,
            TimerEvent::Restarted { remaining_seconds } => Some(format!(
                "> {} {}",
                t("phaseRunning"),
                Self::clock(*remaining_seconds)
            )),
            TimerEvent::DurationChanged { duration_seconds } => Some(format!(
                "{} {}",
                t("setDuration"),
                Self::clock(*duration_seconds)
            )),
            TimerEvent::LoudChanged { enabled } => {
                Some(t(if *enabled { "loudOn" } else { "quietOn" }).to_string())
            }
            TimerEvent::LocaleChanged {
                locale: changed,
                has_permission,
            } => {
                let mut text = format!("{}: {}", t("changeLanguage"), changed.native_name());
                if !has_permission {
                    text.push_str(&format!("\n! {}", t("permissionWarning")));
                }
                Some(text)
            }
            TimerEvent::PermissionResolved { granted: false } => {
                Some(format!("! {}", t("permissionWarning")))
            }
            TimerEvent::PermissionResolved { granted: true } => None,
        }
    }

    /// Renders the 20/20/20 rule.
    pub fn about_text(locale: Locale) -> String {
        ["ruleTitle", "", "ruleDescription", "ruleStep1", "ruleStep2", "ruleStep3", "", "ruleFooter"]
            .iter()
            .map(|key| if key.is_empty() { "" } else { translate(locale, key) })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders the available languages, marking `current`.
    pub fn languages_text(current: Locale) -> String {
        available_locales()
            .iter()
            .map(|locale| {
                let marker = if *locale == current { '*' } else { ' ' };
                format!("{} {}  {}", marker, locale.code(), locale.native_name())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders the interactive command list.
    pub fn help_text() -> String {
        SESSION_HELP
            .iter()
            .map(|(command, description)| format!("  {:<12} {}", command, description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders any serializable value as a single JSON line.
    pub fn json_line<T: Serialize>(value: &T) -> Result<String> {
        serde_json::to_string(value).context("Failed to encode JSON output")
    }

    /// Shows the status block.
    pub fn show_status(snapshot: &TimerSnapshot) {
        println!("{}", Self::status_text(snapshot));
    }

    /// Shows a timer event if it renders to anything.
    pub fn show_event(event: &TimerEvent, locale: Locale) {
        if let Some(text) = Self::event_text(event, locale) {
            println!("{}", text);
        }
    }

    /// Shows the 20/20/20 rule.
    pub fn show_about(locale: Locale) {
        println!("{}", Self::about_text(locale));
    }

    /// Shows the language list.
    pub fn show_languages(current: Locale) {
        println!("{}", Self::languages_text(current));
    }

    /// Shows the interactive command list.
    pub fn show_help() {
        println!("{}", Self::help_text());
    }

    /// Prints a value as a JSON line.
    pub fn show_json<T: Serialize>(value: &T) -> Result<()> {
        println!("{}", Self::json_line(value)?);
        Ok(())
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Formats remaining seconds as (minutes, seconds).
    fn format_time(total_seconds: u32) -> (u32, u32) {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        (minutes, seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================
