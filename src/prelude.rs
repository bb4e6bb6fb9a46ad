//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use audio_scope_helper::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{Result, ScopeError};

// Snapshot
pub use crate::snapshot::listing::{Listing, ListingEntry, MuteVerboseState};
pub use crate::snapshot::poller::SnapshotPoller;
pub use crate::snapshot::telemetry::TelemetrySnapshot;

// Meter
pub use crate::meter::filter::{LoadDisplay, MeterFilter, MeterReadout};
pub use crate::meter::message_log::{Message, MessageLog};

// Listing
pub use crate::listing::diff::ListingDiffTracker;

// Render
pub use crate::render::palette::Palette;
