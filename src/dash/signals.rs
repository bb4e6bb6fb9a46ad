//! Shared stop flag wired to OS signals.
//!
//! The same `AtomicBool` serves three writers: the foreground key handler,
//! SIGINT, and SIGTERM. The polling thread reads it at the top of every
//! iteration. All access uses `Ordering::Relaxed` because the flag is polled
//! each tick and no ordering with other atomics is required.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::{SIGINT, SIGTERM};

/// Cloneable stop flag shared between the foreground and the poll thread.
#[derive(Debug, Clone)]
pub struct StopFlag {
    flag: Arc<AtomicBool>,
}

impl StopFlag {
    /// Create a flag and register SIGINT/SIGTERM to set it.
    ///
    /// Registration is best-effort; failures are logged to stderr but not
    /// fatal — the keyboard exit path still works.
    #[must_use]
    pub fn new() -> Self {
        let stop = Self::unregistered();
        if let Err(e) = signal_hook::flag::register(SIGINT, Arc::clone(&stop.flag)) {
            eprintln!("[ASC-SIGNAL] failed to register SIGINT: {e}");
        }
        if let Err(e) = signal_hook::flag::register(SIGTERM, Arc::clone(&stop.flag)) {
            eprintln!("[ASC-SIGNAL] failed to register SIGTERM: {e}");
        }
        stop
    }

    /// Create a flag without touching OS signal handlers (tests, embedding).
    #[must_use]
    pub fn unregistered() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Request a stop.
    pub fn set(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}
