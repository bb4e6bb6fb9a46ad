//! RAII terminal lifecycle guard.
//!
//! Enters raw mode and the alternate screen on construction and restores the
//! terminal on `Drop`, including the early-error and panic-unwind paths, so
//! the closing message always prints on a usable screen.

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

/// Guard that owns the raw-mode + alternate-screen session.
pub struct TerminalGuard(());

impl TerminalGuard {
    /// Enable raw mode, enter the alternate screen, and hide the cursor.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self(()))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}
