use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Single-list terminal to-do app.
/// Tasks live only for the current session; nothing is written to disk.
#[derive(Parser)]
#[command(name = "tl", version, about = "Session-scoped terminal to-do list")]
pub struct Cli {
    /// Event poll interval in milliseconds.
    #[arg(long, env = "TASKLIST_TICK_RATE", default_value_t = 50, global = true)]
    pub tick_rate: u64,

    /// Log level or tracing filter directive (e.g. `debug`, `tasklist=trace`).
    /// A valid `RUST_LOG` replaces it.
    #[arg(long, env = "TASKLIST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log file path. Defaults to the user's local data directory.
    #[arg(long, env = "TASKLIST_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Print the final task list as JSON after the UI exits.
    #[arg(long, global = true)]
    pub print_on_exit: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
