//! Dashboard runtimes: terminal lifecycle, stop signaling, and the two
//! polling loops (telemetry meters, listings).
//!
//! Each dashboard runs exactly one named background polling thread plus the
//! foreground thread. The foreground waits for a keypress, sets the shared
//! stop flag, and blocks on a bounded(1) done channel until the poll thread
//! acknowledges — one handshake, no timeout, shutdown completes within one
//! polling interval.

pub mod listings;
pub mod meters;
pub mod signals;
pub mod terminal;

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::dash::signals::StopFlag;

/// How long the foreground loop waits per input poll.
const INPUT_POLL_WAIT: Duration = Duration::from_millis(50);

/// Block the foreground thread until an exit key arrives or the stop flag is
/// set externally (SIGINT/SIGTERM). Enter is the documented exit key;
/// `q`/Esc/Ctrl-C are accepted as equivalents.
pub(crate) fn wait_for_exit_key(stop: &StopFlag) {
    while !stop.is_set() {
        let ready = match event::poll(INPUT_POLL_WAIT) {
            Ok(ready) => ready,
            // Input subsystem failure: treat as an exit request rather than
            // spinning forever on a dead stdin.
            Err(_) => return,
        };
        if !ready {
            continue;
        }
        let Ok(Event::Key(key)) = event::read() else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char('q') | KeyCode::Esc => return,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return,
            _ => {}
        }
    }
}
