//! Telemetry meters dashboard: 20 ms poll → filter → frame.

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
use crate::logger::DiagHandle;
use crate::logger::jsonl::{DiagEntry, EventKind, Severity};
use crate::meter::filter::MeterFilter;
use crate::meter::message_log::MessageLog;
use crate::render::meters::render_meter_frame;
use crate::render::palette::Palette;
use crate::snapshot::poller::SnapshotPoller;
use crate::snapshot::telemetry::TelemetrySnapshot;

/// Fixed message printed after the terminal is restored.
pub const CLOSING_MESSAGE: &str = "ascope meters closed.";

/// Run the meters dashboard until the user exits.
pub fn run(config: &Config, palette: Palette, diag: &DiagHandle) -> Result<()> {
    diag.lock().write_entry(&DiagEntry::new(
        EventKind::DashboardStart,
        Severity::Info,
        "meters",
        format!("polling {}", config.files.telemetry_file.display()),
    ));

    let guard = TerminalGuard::enter().map_err(|e| ScopeError::Runtime {
        details: format!("terminal setup failed: {e}"),
    })?;

    let stop = StopFlag::new();
    let (done_tx, done_rx) = bounded::<()>(1);

    let poller = SnapshotPoller::<TelemetrySnapshot>::new(config.files.telemetry_file.clone());
    let interval = Duration::from_millis(config.meters.poll_interval_ms);
    let thread_stop = stop.clone();
    let thread_diag = Arc::clone(diag);
    let join = thread::Builder::new()
        .name("ascope-meters".to_string())
        .spawn(move || {
            meter_loop(&poller, interval, palette, &thread_stop, &done_tx, &thread_diag);
        })
        .map_err(|e| ScopeError::Runtime {
            details: format!("failed to spawn meters poll thread: {e}"),
        })?;

    // Foreground: block on a keypress, then signal and wait for the
    // acknowledgement before restoring the terminal.
    wait_for_exit_key(&stop);
    stop.set();
    done_rx
        .recv()
        .map_err(|_| ScopeError::ChannelClosed { component: "meters" })?;
    let _ = join.join();
    drop(guard);

    diag.lock().write_entry(&DiagEntry::new(
        EventKind::DashboardStop,
        Severity::Info,
        "meters",
        "closed by user",
    ));
    println!("{CLOSING_MESSAGE}");
    Ok(())
}

/// Background polling loop. Owns every piece of mutable dashboard state;
/// nothing here is shared except the stop flag, the done channel, and the
/// diagnostics handle.
fn meter_loop(
    poller: &SnapshotPoller<TelemetrySnapshot>,
    interval: Duration,
    palette: Palette,
    stop: &StopFlag,
    done: &Sender<()>,
    diag: &DiagHandle,
) {
    let mut stdout = io::stdout();
    let mut filter = MeterFilter::new();
    let mut log = MessageLog::new();
    let mut snap = TelemetrySnapshot::default();
    let mut stale = true;
    let mut last_fault: Option<&'static str> = None;

    while !stop.is_set() {
        match poller.read() {
            Ok(next) => {
                snap = next;
                stale = false;
                log.observe(&snap.info_message);
                if last_fault.take().is_some() {
                    diag.lock().write_entry(&DiagEntry::new(
                        EventKind::PollRecovered,
                        Severity::Info,
                        "meters",
                        format!("snapshot readable again: {}", poller.path().display()),
                    ));
                }
            }
            Err(e) => {
                // Previous snapshot state is retained; the frame renders
                // stale data plus the fault in the message log.
                stale = true;
                log.note(&e.to_string());
                if last_fault != Some(e.code()) {
                    last_fault = Some(e.code());
                    let mut entry = DiagEntry::new(
                        EventKind::PollError,
                        Severity::Warning,
                        "meters",
                        e.to_string(),
                    );
                    entry.error_code = Some(e.code().to_string());
                    diag.lock().write_entry(&entry);
                }
            }
        }

        let readout = filter.update(&snap);
        let frame = render_meter_frame(&snap, &readout, &log, filter.elapsed(), stale, &palette);
        let _ = stdout.write_all(frame.as_bytes());
        let _ = stdout.flush();

        thread::sleep(interval);
    }

    let _ = done.send(());
}
