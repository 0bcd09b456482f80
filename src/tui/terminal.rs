//! Terminal setup and teardown utilities.

use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{Result, WatchlistError};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode, switches to the alternate screen buffer and asks the
/// terminal to report focus changes.
///
/// # Errors
///
/// Returns an error if terminal initialization fails or if stdout is not a TTY.
pub fn setup_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(WatchlistError::Io(
            "TUI requires an interactive terminal (TTY)".to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| WatchlistError::Io(format!("failed to enable raw mode: {e}")))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange).map_err(|e| {
        let _ = disable_raw_mode();
        WatchlistError::Io(format!("failed to enter alternate screen: {e}"))
    })?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| {
        let _ = disable_raw_mode();
        WatchlistError::Io(format!("failed to create terminal: {e}"))
    })?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// # Errors
///
/// Returns an error if terminal restoration fails.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| WatchlistError::Io(e.to_string()))?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)
        .map_err(|e| WatchlistError::Io(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| WatchlistError::Io(e.to_string()))?;
    Ok(())
}

/// Rings the terminal bell.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn ring_bell(terminal: &mut Tui) -> Result<()> {
    let out = terminal.backend_mut();
    out.write_all(b"\x07")
        .and_then(|()| out.flush())
        .map_err(|e| WatchlistError::Io(format!("failed to ring bell: {e}")))
}
