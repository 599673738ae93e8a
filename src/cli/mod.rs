//! CLI module for eyerest.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `session`: The interactive stdin loop behind `eyerest run`

pub mod commands;
pub mod display;
pub mod session;

pub use commands::{AboutArgs, Cli, Commands, RunArgs};
pub use display::Display;
pub use session::{run_session, SessionCommand, SessionOptions};
