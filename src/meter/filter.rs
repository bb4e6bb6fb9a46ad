//! Per-tick meter filters: peak-hold load with overload latch, dB smoothing
//! with decimated readout, bar extent mapping, and hold-gated indicators.
//!
//! One formula set, used everywhere: instantaneous load is
//! `loadNanos / 1e9 × sampleRate` (fraction of real time the engine spends
//! per sample), and the VU bar maps dB linearly at 2.5 dB per segment so the
//! −120 dB floor lands exactly on zero segments.

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use std::time::{Duration, Instant};

use crate::snapshot::telemetry::TelemetrySnapshot;

// ──────────────────── tuning constants ────────────────────

/// Lowest displayable level; `vuLevel == 0` maps exactly here.
pub const DB_FLOOR: f64 = -120.0;
/// Exponential smoothing coefficient for the dB readout.
pub const DB_SMOOTHING: f64 = 0.3;
/// Ticks between refreshes of the decimal dB readout.
pub const READOUT_DECIMATION_TICKS: u32 = 15;
/// Ticks the OVLD sentinel stays up after the last overload tick.
pub const OVERLOAD_HOLD_TICKS: u32 = 50;
/// Ticks the gain-reduction indicator stays up after the flag clears.
pub const GAIN_REDUCTION_HOLD_TICKS: u32 = 5;
/// Geometric per-tick decay of the peak-hold load meter.
pub const PEAK_DECAY: f64 = 0.999;
/// VU bar width in segments; full scale (0 dB) fills the bar.
pub const BAR_SEGMENTS: u32 = 48;
/// Instantaneous load above this renders the load readout in alert color.
pub const LOAD_ALERT_THRESHOLD: f64 = 0.9;

const BAR_DB_PER_SEGMENT: f64 = 2.5;

// ──────────────────── derived quantities ────────────────────

/// Fraction of real time spent computing one sample.
#[must_use]
pub fn instantaneous_load(load_nanos: u64, sample_rate: f64) -> f64 {
    load_nanos as f64 / 1e9 * sample_rate
}

/// Linear level to dB, clamped to [`DB_FLOOR`] (zero maps exactly to it).
#[must_use]
pub fn db_from_vu(vu_level: f64) -> f64 {
    let db = 20.0 * vu_level.log10();
    if db.is_finite() { db.max(DB_FLOOR) } else { DB_FLOOR }
}

/// Bounded linear dB → segment mapping; monotonic, saturating at both ends.
#[must_use]
pub fn bar_extent(db: f64) -> u32 {
    let segments = f64::from(BAR_SEGMENTS) + db / BAR_DB_PER_SEGMENT;
    segments.clamp(0.0, f64::from(BAR_SEGMENTS)).round() as u32
}

// ──────────────────── readout model ────────────────────

/// What the load cell shows this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadDisplay {
    /// Overload sentinel, shown for the entire hold duration.
    Overload,
    /// Peak-hold load value.
    Value(f64),
}

/// Display quantities derived once per tick, consumed by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterReadout {
    pub load: LoadDisplay,
    /// Instantaneous load crossed the alert threshold this tick.
    pub load_alert: bool,
    /// Filled VU bar segments out of [`BAR_SEGMENTS`].
    pub bar_segments: u32,
    /// Decimated decimal dB readout; empty at or below the floor.
    pub db_text: String,
    /// Raw clip flag, no hold.
    pub clip: bool,
    /// Gain-reduction indicator (hold-gated).
    pub gain_reduction: bool,
}

// ──────────────────── filter state ────────────────────

/// Mutable meter state, owned exclusively by the telemetry dashboard's
/// polling thread and advanced once per tick.
#[derive(Debug)]
pub struct MeterFilter {
    started: Instant,
    load_peak: f64,
    overload_ticks: u32,
    filtered_db: f64,
    decimation: u32,
    gain_ticks: u32,
    db_readout: String,
}

impl MeterFilter {
    /// Fresh filter state; everything initializes at rest.
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            load_peak: 0.0,
            overload_ticks: 0,
            filtered_db: DB_FLOOR,
            // One short of the refresh threshold so the very first tick
            // populates the readout instead of leaving it blank for 15 ticks.
            decimation: READOUT_DECIMATION_TICKS - 1,
            gain_ticks: 0,
            db_readout: String::new(),
        }
    }

    /// Time since the dashboard launched.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Advance one tick from a raw snapshot.
    pub fn update(&mut self, snap: &TelemetrySnapshot) -> MeterReadout {
        // Inactive engine forces load and level to zero.
        let inst = if snap.active {
            instantaneous_load(snap.load_nanos, snap.sample_rate)
        } else {
            0.0
        };

        // Peak-hold: geometric decay, snaps upward on a new peak. An
        // inactive engine forces the peak straight to zero instead of
        // letting it decay there.
        if snap.active {
            self.load_peak *= PEAK_DECAY;
            if inst > self.load_peak {
                self.load_peak = inst;
            }
        } else {
            self.load_peak = 0.0;
        }

        // Overload latch: arming shows the sentinel this tick; each
        // subsequent tick decrements while still showing, so the sentinel
        // survives exactly OVERLOAD_HOLD_TICKS ticks past the last arming.
        let load = if inst > 1.0 {
            self.overload_ticks = OVERLOAD_HOLD_TICKS;
            LoadDisplay::Overload
        } else if self.overload_ticks > 0 {
            self.overload_ticks -= 1;
            LoadDisplay::Overload
        } else {
            LoadDisplay::Value(self.load_peak)
        };

        if snap.active {
            let db = db_from_vu(snap.vu_level);
            self.filtered_db += (db - self.filtered_db) * DB_SMOOTHING;
        } else {
            self.filtered_db = DB_FLOOR;
        }

        // Decimated readout: refresh once every READOUT_DECIMATION_TICKS.
        self.decimation += 1;
        if self.decimation >= READOUT_DECIMATION_TICKS {
            self.decimation = 0;
            self.db_readout = if self.filtered_db <= DB_FLOOR {
                String::new()
            } else {
                format!("{:.1}", self.filtered_db)
            };
        }

        let gain_reduction = if snap.gain_reduction_active {
            self.gain_ticks = GAIN_REDUCTION_HOLD_TICKS;
            true
        } else if self.gain_ticks > 0 {
            self.gain_ticks -= 1;
            true
        } else {
            false
        };

        MeterReadout {
            load,
            load_alert: inst > LOAD_ALERT_THRESHOLD,
            bar_segments: bar_extent(self.filtered_db),
            db_text: self.db_readout.clone(),
            clip: snap.clipping,
            gain_reduction,
        }
    }
}

impl Default for MeterFilter {
    fn default() -> Self {
        Self::new()
    }
}

// ──────────────────── tests ────────────────────
