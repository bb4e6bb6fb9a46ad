//! Redraw suppression for the listing dashboard.
//!
//! A redraw is warranted only when the listing snapshot file's modification
//! time changed or the mute/verbose view state changed since the previous
//! poll. Everything is plain value comparison; an absent file (`None` mtime)
//! is itself a comparable state, so a missing file does not flicker either.

use std::time::SystemTime;

use crate::snapshot::listing::MuteVerboseState;

/// Tracks the last-observed mtime and view state across polls.
#[derive(Debug, Default)]
pub struct ListingDiffTracker {
    last_mtime: Option<SystemTime>,
    last_state: Option<MuteVerboseState>,
}

impl ListingDiffTracker {
    /// Fresh tracker; the first poll always reports a change.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the current observations against the previous poll, record
    /// them, and report whether the frame must be redrawn.
    pub fn should_redraw(&mut self, mtime: Option<SystemTime>, state: &MuteVerboseState) -> bool {
        let changed = self.last_mtime != mtime || self.last_state.as_ref() != Some(state);
        if changed {
            self.last_mtime = mtime;
            self.last_state = Some(state.clone());
        }
        changed
    }
}
