//! TUI entry point and terminal setup.

use std::io::{self, Write};
use std::sync::mpsc;
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::warn;

use crate::error::Result;
use crate::list::TaskList;
use crate::tui::app::App;

/// Puts the terminal back into cooked mode on the main screen when dropped,
/// so early returns and panics inside the event loop leave a usable shell.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "failed to leave raw mode");
        }
        if let Err(e) = restore_screen(&mut io::stdout()) {
            warn!(error = %e, "failed to restore terminal screen");
        }
    }
}

/// Undo everything `TerminalGuard::enter` switched on, apart from raw mode.
fn restore_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(
        out,
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange,
        Show
    )
}

/// Initialise and run the terminal user interface.
/// Returns the task list as it stood when the user quit.
pub fn run_tui(tick_rate: Duration) -> Result<TaskList> {
    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let mut app = App::new(tick_rate).with_host_channel(rx);
    if let Err(e) = tx.send(format!("session started (tl {})", env!("CARGO_PKG_VERSION"))) {
        warn!(error = %e, "failed to post host message");
    }
    app.run(&mut terminal)?;
    Ok(app.into_list())
}
