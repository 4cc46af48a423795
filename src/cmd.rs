//! Command implementations for the CLI interface.

use std::time::Duration;

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use eyre::WrapErr;
use tracing::info;

use crate::cli::Cli;
use crate::tui::run::run_tui;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Launch the interactive UI (the default).
    Ui,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Run the interactive session, optionally printing the final list as JSON.
pub fn cmd_ui(tick_rate: Duration, print_on_exit: bool) -> eyre::Result<()> {
    info!(tick_rate_ms = tick_rate.as_millis() as u64, "session starting");
    let list = run_tui(tick_rate).wrap_err("terminal UI failed")?;
    info!(
        tasks = list.len(),
        completed = list.completed_count(),
        "session ended"
    );
    if print_on_exit {
        println!("{}", serde_json::to_string_pretty(&list)?);
    }
    Ok(())
}

/// Write a completion script for `shell` to stdout.
pub fn cmd_completions(shell: Shell) {
    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
