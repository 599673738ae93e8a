//! eyerest - a 20/20/20 eye-rest reminder
//!
//! Every 20 minutes, look at something 20 feet away for 20 seconds:
//! - `eyerest run` counts down and notifies you, then starts over
//! - `eyerest about` explains the rule

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;

use eyerest::cli::{run_session, Cli, Commands, Display, RunArgs, SessionOptions};
use eyerest::engine::TimerService;
use eyerest::notification::{PlatformDispatcher, TerminalBackend};
use eyerest::sound::{try_create_player, SoundPlayer};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run(args).await?,
        Some(Commands::About(args)) => Display::show_about(args.lang),
        Some(Commands::Languages) => Display::show_languages(eyerest::Locale::default()),
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs an interactive timer session on stdin.
async fn run(args: RunArgs) -> Result<()> {
    let config = args.to_config();
    config.validate().context("Invalid timer configuration")?;

    let sound: Option<Box<dyn SoundPlayer>> = if args.no_sound {
        None
    } else {
        try_create_player().map(|player| Box::new(player) as Box<dyn SoundPlayer>)
    };
    let platform = args.platform();
    let dispatcher = PlatformDispatcher::new(platform, TerminalBackend::new(sound));
    tracing::info!(%platform, duration = config.duration_seconds, "Starting session");

    let (service, handle, events) = TimerService::new(config, dispatcher);
    let options = SessionOptions {
        autostart: args.autostart,
        json: args.json,
        locale: args.lang,
    };

    let session = async {
        let stdin = BufReader::new(tokio::io::stdin());
        let result = tokio::select! {
            result = run_session(&handle, events, stdin, options) => result,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                Ok(())
            }
        };
        // The service is still running here, so this cannot fail.
        let _ = handle.shutdown();
        result
    };

    let (snapshot, result) = tokio::join!(service.run(), session);
    tracing::info!(
        cycles = snapshot.completed_cycles,
        remaining = snapshot.remaining_seconds,
        "Session ended"
    );
    result
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
