//! Command definitions for the eyerest CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::i18n::Locale;
use crate::notification::Platform;
use crate::types::{TimerConfig, DEFAULT_DURATION_SECONDS};

// ============================================================================
// CLI Structure
// ============================================================================

/// eyerest - a 20/20/20 eye-rest reminder
#[derive(Parser, Debug)]
#[command(
    name = "eyerest",
    version,
    about = "20/20/20 eye-rest reminder timer",
    long_about = "Every 20 minutes, look at something 20 feet away for 20 seconds.\n\
                  eyerest counts down, notifies you when it is time to rest, and starts over.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive timer session (commands are read from stdin)
    Run(RunArgs),

    /// Explain the 20/20/20 rule
    About(AboutArgs),

    /// List available languages
    Languages,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Countdown length in seconds
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_DURATION_SECONDS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub duration: u32,

    /// Use loud notifications (sound and vibration)
    #[arg(long)]
    pub loud: bool,

    /// Notification language (en, es, zh)
    #[arg(short, long, default_value = "en")]
    pub lang: Locale,

    /// Notification style; detected from the build target when omitted
    #[arg(short, long)]
    pub platform: Option<Platform>,

    /// Start counting down immediately
    #[arg(short, long)]
    pub autostart: bool,

    /// Disable notification sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Print events and snapshots as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION_SECONDS,
            loud: false,
            lang: Locale::En,
            platform: None,
            autostart: false,
            no_sound: false,
            json: false,
        }
    }
}

impl RunArgs {
    /// Builds the timer configuration from the arguments.
    pub fn to_config(&self) -> TimerConfig {
        TimerConfig::default()
            .with_duration_seconds(self.duration)
            .with_loud_notifications(self.loud)
            .with_locale(self.lang)
    }

    /// Returns the requested platform, or the detected one.
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::detect)
    }
}

/// Arguments for the about command
#[derive(Args, Debug, Clone)]
pub struct AboutArgs {
    /// Language to explain the rule in
    #[arg(short, long, default_value = "en")]
    pub lang: Locale,
}

// ============================================================================
// Tests
// ============================================================================
