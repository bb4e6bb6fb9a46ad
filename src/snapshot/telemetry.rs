//! Telemetry snapshot schema as published by the engine process.
//!
//! The engine overwrites its telemetry file many times per second; the field
//! set below is the fixed contract. All fields use `#[serde(default)]` so a
//! partial snapshot (engine mid-write, older engine build) still decodes —
//! the dashboard tolerates drift and never hard-fails on schema gaps.

use serde::{Deserialize, Serialize};

/// One decoded telemetry snapshot. Read-only from the dashboard's side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    /// Engine is producing audio. When false, load and level display as zero.
    pub active: bool,
    /// Linear output level, 0.0..=1.0 nominal (1.0 = 0 dB full scale).
    pub vu_level: f64,
    /// Output stage is clipping right now.
    pub clipping: bool,
    /// Nanoseconds the engine spent computing the last audio block.
    pub load_nanos: u64,
    /// Latest status message; `"clear"` resets the dashboard message log.
    pub info_message: String,
    pub mouse_x: f64,
    pub mouse_y: f64,
    pub paused: bool,
    /// Per-slot mute flags; also published separately for the listing view.
    pub mute_flags: Vec<bool>,
    pub sample_rate: f64,
    pub gain_reduction_active: bool,
    pub gain_reduction_level: i64,
    pub sync_active: bool,
    /// Output sample width in bits (16/24/32).
    pub bit_format: i64,
    pub channel_label: String,
}
