//! Listings dashboard: 300 ms poll → diff → frame, with redraw suppression.

use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Sender, bounded};

use crate::core::config::Config;
use crate::core::errors::{Result, ScopeError};
use crate::dash::signals::StopFlag;
use crate::dash::terminal::TerminalGuard;
use crate::dash::wait_for_exit_key;
use crate::listing::diff::ListingDiffTracker;
use crate::logger::DiagHandle;
use crate::logger::jsonl::{DiagEntry, EventKind, Severity};
use crate::render::listings::render_listing_frame;
use crate::render::palette::Palette;
use crate::snapshot::listing::{Listing, MuteVerboseState};
use crate::snapshot::poller::SnapshotPoller;

/// Fixed message printed after the terminal is restored.
pub const CLOSING_MESSAGE: &str = "ascope listings closed.";

/// Run the listings dashboard until the user exits.
pub fn run(config: &Config, palette: Palette, diag: &DiagHandle) -> Result<()> {
    diag.lock().write_entry(&DiagEntry::new(
        EventKind::DashboardStart,
        Severity::Info,
        "listings",
        format!("polling {}", config.files.listing_file.display()),
    ));

    let guard = TerminalGuard::enter().map_err(|e| ScopeError::Runtime {
        details: format!("terminal setup failed: {e}"),
    })?;

    let stop = StopFlag::new();
    let (done_tx, done_rx) = bounded::<()>(1);

    let listing_poller = SnapshotPoller::<Vec<Listing>>::new(config.files.listing_file.clone());
    // The mute/verbose view state rides inside the telemetry file's raw JSON
    // and is decoded independently of the full telemetry structure.
    let state_poller =
        SnapshotPoller::<MuteVerboseState>::new(config.files.telemetry_file.clone());
    let interval = Duration::from_millis(config.listings.poll_interval_ms);
    let thread_stop = stop.clone();
    let thread_diag = Arc::clone(diag);
    let join = thread::Builder::new()
        .name("ascope-listings".to_string())
        .spawn(move || {
            listing_loop(
                &listing_poller,
                &state_poller,
                interval,
                palette,
                &thread_stop,
                &done_tx,
                &thread_diag,
            );
        })
        .map_err(|e| ScopeError::Runtime {
            details: format!("failed to spawn listings poll thread: {e}"),
        })?;

    wait_for_exit_key(&stop);
    stop.set();
    done_rx.recv().map_err(|_| ScopeError::ChannelClosed {
        component: "listings",
    })?;
    let _ = join.join();
    drop(guard);

    diag.lock().write_entry(&DiagEntry::new(
        EventKind::DashboardStop,
        Severity::Info,
        "listings",
        "closed by user",
    ));
    println!("{CLOSING_MESSAGE}");
    Ok(())
}

/// Background polling loop. A tick with an unchanged mtime and an unchanged
/// mute/verbose state writes nothing — no clear, no flicker.
fn listing_loop(
    listing_poller: &SnapshotPoller<Vec<Listing>>,
    state_poller: &SnapshotPoller<MuteVerboseState>,
    interval: Duration,
    palette: Palette,
    stop: &StopFlag,
    done: &Sender<()>,
    diag: &DiagHandle,
) {
    let mut stdout = io::stdout();
    let mut tracker = ListingDiffTracker::new();
    let mut listings: Vec<Listing> = Vec::new();
    let mut state = MuteVerboseState::default();
    let mut last_fault: Option<&'static str> = None;

    while !stop.is_set() {
        match listing_poller.read() {
            Ok(next) => {
                listings = next;
                if last_fault.take().is_some() {
                    diag.lock().write_entry(&DiagEntry::new(
                        EventKind::PollRecovered,
                        Severity::Info,
                        "listings",
                        format!("snapshot readable again: {}", listing_poller.path().display()),
                    ));
                }
            }
            Err(e) => {
                // Keep the previous decoded listings.
                if last_fault != Some(e.code()) {
                    last_fault = Some(e.code());
                    let mut entry = DiagEntry::new(
                        EventKind::PollError,
                        Severity::Warning,
                        "listings",
                        e.to_string(),
                    );
                    entry.error_code = Some(e.code().to_string());
                    diag.lock().write_entry(&entry);
                }
            }
        }

        // Best-effort: a torn telemetry read keeps the previous view state.
        if let Ok(next) = state_poller.read() {
            state = next;
        }

        let mtime = listing_poller.modified();
        if tracker.should_redraw(mtime, &state) {
            let frame = render_listing_frame(&listings, &state, &palette);
            let _ = stdout.write_all(frame.as_bytes());
            let _ = stdout.flush();
        }

        thread::sleep(interval);
    }

    let _ = done.send(());
}
