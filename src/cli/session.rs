//! Interactive session for `eyerest run`.
//!
//! Reads one command per line and forwards it to the timer service, while
//! rendering timer events as they arrive. End of input ends the session.

use std::str::FromStr;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::display::Display;
use crate::engine::{TimerEvent, TimerHandle};
use crate::i18n::Locale;

// ============================================================================
// SessionCommand
// ============================================================================

/// A parsed line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Pause,
    Toggle,
    Reset,
    /// Raw duration text; validated by the engine
    Set(String),
    Loud(bool),
    Lang(Locale),
    Status,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_ascii_lowercase();
        let argument = words.next();

        match (command.as_str(), argument) {
            ("start", None) => Ok(Self::Start),
            ("pause", None) => Ok(Self::Pause),
            ("toggle", None) => Ok(Self::Toggle),
            ("reset", None) => Ok(Self::Reset),
            ("set", Some(value)) => Ok(Self::Set(value.to_string())),
            ("set", None) => Err("usage: set <secs>".to_string()),
            ("loud", Some("on")) => Ok(Self::Loud(true)),
            ("loud", Some("off")) => Ok(Self::Loud(false)),
            ("loud", _) => Err("usage: loud on|off".to_string()),
            ("lang", Some(code)) => code
                .parse::<Locale>()
                .map(Self::Lang)
                .map_err(|e| e.to_string()),
            ("lang", None) => Err("usage: lang <code>".to_string()),
            ("status", None) => Ok(Self::Status),
            ("help" | "?", None) => Ok(Self::Help),
            ("quit" | "exit" | "q", None) => Ok(Self::Quit),
            _ => Err(format!("unknown command: {} (try 'help')", line.trim())),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Output options for a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Start the countdown before reading input
    pub autostart: bool,
    /// Print JSON lines instead of text
    pub json: bool,
    /// Language for rendered text
    pub locale: Locale,
}

/// Runs the session until `quit` or end of input.
pub async fn run_session<R>(
    handle: &TimerHandle,
    mut events: mpsc::UnboundedReceiver<TimerEvent>,
    input: R,
    options: SessionOptions,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut session = Session {
        handle,
        json: options.json,
        locale: options.locale,
    };

    if options.autostart {
        handle.start()?;
    }

    let mut lines = input.lines();
    loop {
        tokio::select! {
            Some(event) = events.recv() => session.render_event(&event)?,
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input, leaving session");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<SessionCommand>() {
                    Ok(SessionCommand::Quit) => break,
                    Ok(command) => session.execute(command).await?,
                    Err(message) => Display::show_error(&message),
                }
            }
        }
    }

    // Flush whatever the last commands produced.
    while let Ok(event) = events.try_recv() {
        session.render_event(&event)?;
    }
    Ok(())
}

struct Session<'a> {
    handle: &'a TimerHandle,
    json: bool,
    locale: Locale,
}

impl Session<'_> {
    async fn execute(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::Start => self.handle.start(),
            SessionCommand::Pause => self.handle.pause(),
            SessionCommand::Toggle => self.handle.toggle(),
            SessionCommand::Reset => self.handle.reset(),
            SessionCommand::Set(value) => self.handle.set_duration(value),
            SessionCommand::Loud(enabled) => self.handle.toggle_loud(enabled),
            SessionCommand::Lang(locale) => self.handle.set_locale(locale),
            SessionCommand::Status => {
                let snapshot = self.handle.snapshot().await?;
                if self.json {
                    Display::show_json(&snapshot)
                } else {
                    Display::show_status(&snapshot);
                    Ok(())
                }
            }
            SessionCommand::Help => {
                Display::show_help();
                Ok(())
            }
            SessionCommand::Quit => Ok(()),
        }
    }

    fn render_event(&mut self, event: &TimerEvent) -> Result<()> {
        if let TimerEvent::LocaleChanged { locale, .. } = event {
            self.locale = *locale;
        }
        if let TimerEvent::Expired { message, .. } = event {
            debug!(%message, "Cycle expired");
        }

        if self.json {
            return Display::show_json(event);
        }
        if let TimerEvent::PermissionResolved { granted: false } = event {
            warn!("Notifications are not permitted; reminders will be silent");
        }
        Display::show_event(event, self.locale);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_simple_commands() {
            assert_eq!("start".parse::<SessionCommand>(), Ok(SessionCommand::Start));
            assert_eq!(" PAUSE ".parse::<SessionCommand>(), Ok(SessionCommand::Pause));
            assert_eq!("toggle".parse::<SessionCommand>(), Ok(SessionCommand::Toggle));
            assert_eq!("reset".parse::<SessionCommand>(), Ok(SessionCommand::Reset));
            assert_eq!("status".parse::<SessionCommand>(), Ok(SessionCommand::Status));
            assert_eq!("?".parse::<SessionCommand>(), Ok(SessionCommand::Help));
            assert_eq!("exit".parse::<SessionCommand>(), Ok(SessionCommand::Quit));
        }

        #[test]
        fn test_parse_set_keeps_raw_text() {
            assert_eq!("set 90s".parse::<SessionCommand>(), Ok(SessionCommand::Set("90s".to_string())));
            assert_eq!("set abc".parse::<SessionCommand>(), Ok(SessionCommand::Set("abc".to_string())));
            assert!("set".parse::<SessionCommand>().is_err());
        }

        #[test]
        fn test_parse_loud() {
            assert_eq!("loud on".parse::<SessionCommand>(), Ok(SessionCommand::Loud(true)));
            assert_eq!("loud off".parse::<SessionCommand>(), Ok(SessionCommand::Loud(false)));
            assert!("loud maybe".parse::<SessionCommand>().is_err());
        }

        #[test]
        fn test_parse_lang() {
            assert_eq!("lang zh".parse::<SessionCommand>(), Ok(SessionCommand::Lang(Locale::Zh)));
            let err = "lang fr".parse::<SessionCommand>().unwrap_err();
            assert!(err.contains("unsupported language"));
        }

        #[test]
        fn test_parse_unknown() {
            let err = "snooze 5".parse::<SessionCommand>().unwrap_err();
            assert!(err.contains("unknown command: snooze 5"));
            assert!("start now".parse::<SessionCommand>().is_err());
        }
    }

    mod session_tests {
        use std::sync::Arc;

        use tokio::io::BufReader;

        use super::*;
        use crate::engine::TimerService;
        use crate::notification::{MockNotificationBackend, WebDispatcher};
        use crate::types::{TimerConfig, TimerPhase};

        #[tokio::test(start_paused = true)]
        async fn test_session_drives_service() {
            let backend = Arc::new(MockNotificationBackend::new());
            let (service, handle, events) = TimerService::new(
                TimerConfig::default().with_duration_seconds(60),
                WebDispatcher::new(Arc::clone(&backend)),
            );

            let script: &[u8] = b"set 30\nloud on\nlang es\nbogus\nstart\nstatus\nquit\nreset\n";
            let session = async {
                let result = run_session(
                    &handle,
                    events,
                    BufReader::new(script),
                    SessionOptions::default(),
                )
                .await;
                let snapshot = handle.snapshot().await;
                handle.shutdown().unwrap();
                (result, snapshot)
            };

            let (_, (result, snapshot)) = tokio::join!(service.run(), session);
            result.unwrap();

            // Everything after `quit` is ignored.
            let snapshot = snapshot.unwrap();
            assert_eq!(snapshot.phase, TimerPhase::Running);
            assert_eq!(snapshot.duration_seconds, 30);
            assert!(snapshot.loud_notifications_enabled);
            assert_eq!(snapshot.locale, Locale::Es);
        }

        #[tokio::test(start_paused = true)]
        async fn test_session_autostart_and_eof() {
            let backend = Arc::new(MockNotificationBackend::new());
            let (service, handle, events) = TimerService::new(
                TimerConfig::default(),
                WebDispatcher::new(Arc::clone(&backend)),
            );

            let options = SessionOptions {
                autostart: true,
                json: true,
                locale: Locale::En,
            };
            let session = async {
                let result = run_session(&handle, events, BufReader::new(&b""[..]), options).await;
                handle.shutdown().unwrap();
                result
            };

            let (snapshot, result) = tokio::join!(service.run(), session);
            result.unwrap();
            assert!(snapshot.is_running);
        }
    }
}
