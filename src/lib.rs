#![forbid(unsafe_code)]

//! Audio Scope Helper (ascope) — live terminal dashboards for a running
//! audio engine.
//!
//! Two cooperating views over engine-owned snapshot files:
//! 1. **Meters** — level/load telemetry with peak-hold, overload latch,
//!    clip/gain-reduction indicators, and a rolling message log
//! 2. **Listings** — active job listings with mute/verbose filtering and
//!    change-suppressed redraw
//!
//! The engine process owns and periodically overwrites the snapshot files;
//! ascope polls them read-only and tolerates missing or torn reads
//! indefinitely — a degraded frame, never a crash.
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use audio_scope_helper::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use audio_scope_helper::meter::filter::MeterFilter;
//! use audio_scope_helper::snapshot::poller::SnapshotPoller;
//! ```

pub mod prelude;

pub mod core;
pub mod dash;
pub mod listing;
pub mod logger;
pub mod meter;
pub mod render;
pub mod snapshot;
