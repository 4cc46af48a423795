//! # tl - session-scoped terminal to-do list
//!
//! A single scrollable list of tasks, each with a title, a description, a
//! completion flag and a position. Tasks can be added, deleted, completed,
//! renamed, re-described and reordered, with the keyboard or the mouse.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the list
//! tl
//!
//! # Print what was left on the list when you quit
//! tl --print-on-exit
//!
//! # Shell completions
//! tl completions zsh
//! ```
//!
//! Nothing is written to disk: every session starts with an empty list.
//! Logs go to `<local data dir>/tasklist/logs/tasklist.log` unless
//! `--log-file` says otherwise.

use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;

pub mod cli;
pub mod cmd;
pub mod error;
pub mod list;
pub mod logging;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod row;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use logging::{default_log_path, setup_logging};

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        cmd_completions(shell);
        return Ok(());
    }

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    setup_logging(&cli.log_level, &log_path).wrap_err("failed to set up logging")?;

    cmd_ui(Duration::from_millis(cli.tick_rate), cli.print_on_exit)
}
