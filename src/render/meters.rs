//! Telemetry dashboard frame builder.
//!
//! Pure function of the per-tick readout, the message log, and the raw
//! snapshot: produces one complete ANSI frame bracketed by cursor-home and
//! clear-screen so the caller can emit it atomically with a single write.
//! Lines use `\r\n` endings because the dashboard runs in raw mode.

use std::fmt::Write as _;
use std::time::Duration;

use crossterm::Command;
use crossterm::cursor::MoveTo;
use crossterm::style::{Stylize, style};
use crossterm::terminal::{Clear, ClearType};

use crate::meter::filter::{BAR_SEGMENTS, LoadDisplay, MeterReadout};
use crate::meter::message_log::MessageLog;
use crate::render::palette::Palette;
use crate::render::visible_width;
use crate::snapshot::telemetry::TelemetrySnapshot;

/// Fixed frame width in columns.
const FRAME_WIDTH: usize = 72;

/// Fixed closing hint shown in the footer.
const FOOTER_HINT: &str = " Press Enter to exit ";

/// Build one telemetry frame.
#[allow(clippy::too_many_lines)]
#[must_use]
pub fn render_meter_frame(
    snap: &TelemetrySnapshot,
    readout: &MeterReadout,
    log: &MessageLog,
    elapsed: Duration,
    stale: bool,
    palette: &Palette,
) -> String {
    let mut frame = String::new();
    let _ = MoveTo(0, 0).write_ansi(&mut frame);
    let _ = Clear(ClearType::All).write_ansi(&mut frame);

    // ── Header ──
    let mode = if stale {
        style("[STALE]").with(palette.dim)
    } else {
        style("[LIVE]").with(palette.frame)
    };
    let title = format!("┌─ ascope meters  {mode}");
    let uptime = format!("up {} ─┐", human_duration(elapsed.as_secs()));
    let pad = FRAME_WIDTH.saturating_sub(visible_width(&title) + visible_width(&uptime) + 2);
    let _ = writeln!(
        frame,
        "{}{:─<pad$} {uptime}\r",
        style(title).with(palette.frame).bold(),
        "",
    );
    frame.push_str("\r\n");

    // ── Channel line ──
    let sync = if snap.sync_active {
        style("SYNC").with(palette.text).bold()
    } else {
        style("sync").with(palette.dim)
    };
    let paused = if snap.paused {
        style("PAUSED").with(palette.warn).bold()
    } else {
        style("      ").with(palette.dim)
    };
    let _ = writeln!(
        frame,
        "  channel {} {:>7.0} Hz  {:>2}-bit  {sync}  {paused}\r",
        style(format!("{:<12}", snap.channel_label)).with(palette.text),
        snap.sample_rate,
        snap.bit_format,
    );

    // ── Load line ──
    let load_cell = match readout.load {
        LoadDisplay::Overload => style("OVLD".to_string()).with(palette.alert).bold(),
        LoadDisplay::Value(v) => {
            let text = format!("{v:4.2}");
            if readout.load_alert {
                style(text).with(palette.alert)
            } else {
                style(text).with(palette.text)
            }
        }
    };
    let mutes = mute_row(&snap.mute_flags, palette);
    let _ = writeln!(frame, "  load  {load_cell}   mutes {mutes}\r");

    // ── VU line ──
    let filled = readout.bar_segments.min(BAR_SEGMENTS) as usize;
    let empty = (BAR_SEGMENTS as usize).saturating_sub(filled);
    let bar_color = if readout.clip { palette.alert } else { palette.text };
    let bar = style(format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(empty)
    ))
    .with(bar_color);
    let db = if readout.db_text.is_empty() {
        style(String::new()).with(palette.dim)
    } else {
        style(format!("{:>7} dB", readout.db_text)).with(palette.text)
    };
    let clip = if readout.clip {
        style("CLIP").with(palette.alert).bold()
    } else {
        style("clip").with(palette.dim)
    };
    let gr = if readout.gain_reduction {
        style(format!("GR {}", snap.gain_reduction_level))
            .with(palette.warn)
            .bold()
    } else {
        style("gr".to_string()).with(palette.dim)
    };
    let _ = writeln!(frame, "  vu    {bar} {db}  {clip}  {gr}\r");

    // ── Pointer line ──
    let _ = writeln!(
        frame,
        "  mouse {:.2} {:.2}\r",
        snap.mouse_x, snap.mouse_y
    );
    frame.push_str("\r\n");

    // ── Message log ──
    let _ = writeln!(frame, "  {}\r", style("── messages ──").with(palette.frame));
    for message in log.iter() {
        if message.content.is_empty() {
            let _ = writeln!(frame, "  {}\r", style("·").with(palette.dim));
        } else {
            let stamp = message.added_at.format("%H:%M:%S");
            let _ = writeln!(
                frame,
                "  {}  {}\r",
                style(stamp.to_string()).with(palette.dim),
                style(message.content.as_str()).with(palette.text),
            );
        }
    }
    frame.push_str("\r\n");

    // ── Footer ──
    let pad = FRAME_WIDTH.saturating_sub(FOOTER_HINT.len() + 4);
    let _ = write!(
        frame,
        "{}",
        style(format!("└─{FOOTER_HINT}{:─<pad$}─┘", "")).with(palette.frame),
    );

    frame
}

/// Compact mute flag row: `M` for muted slots, `·` otherwise.
fn mute_row(flags: &[bool], palette: &Palette) -> String {
    if flags.is_empty() {
        return format!("{}", style("-").with(palette.dim));
    }
    let mut out = String::new();
    for &muted in flags {
        if muted {
            let _ = write!(out, "{}", style("M").with(palette.warn));
        } else {
            let _ = write!(out, "{}", style("·").with(palette.dim));
        }
    }
    out
}

/// Human-readable elapsed time.
fn human_duration(secs: u64) -> String {
    if secs < 60 {
        return format!("{secs}s");
    }
    if secs < 3600 {
        return format!("{}m {}s", secs / 60, secs % 60);
    }
    let hours = secs / 3600;
    if hours < 24 {
        return format!("{}h {}m", hours, (secs % 3600) / 60);
    }
    let days = hours / 24;
    format!("{}d {}h", days, hours % 24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meter::filter::MeterFilter;
    use crate::render::strip_ansi;

    fn frame_for(snap: &TelemetrySnapshot) -> String {
        let mut filter = MeterFilter::new();
        let readout = filter.update(snap);
        render_meter_frame(
            snap,
            &readout,
            &MessageLog::new(),
            Duration::from_secs(90),
            false,
            &Palette::default(),
        )
    }

    #[test]
    fn frame_is_bracketed_by_home_and_clear() {
        let frame = frame_for(&TelemetrySnapshot::default());
        assert!(frame.starts_with("\u{1b}[1;1H\u{1b}[2J"));
    }

    #[test]
    fn default_state_renders_without_panicking() {
        let frame = strip_ansi(&frame_for(&TelemetrySnapshot::default()));
        assert!(frame.contains("ascope meters"));
        assert!(frame.contains("Press Enter to exit"));
        assert!(frame.contains("up 1m 30s"));
    }

    #[test]
    fn overload_sentinel_appears_in_frame() {
        let snap = TelemetrySnapshot {
            active: true,
            sample_rate: 48_000.0,
            load_nanos: 40_000, // ~1.9 load
            ..TelemetrySnapshot::default()
        };
        let frame = strip_ansi(&frame_for(&snap));
        assert!(frame.contains("OVLD"));
    }

    #[test]
    fn clip_indicator_reflects_raw_flag() {
        let snap = TelemetrySnapshot {
            active: true,
            clipping: true,
            sample_rate: 48_000.0,
            ..TelemetrySnapshot::default()
        };
        let frame = strip_ansi(&frame_for(&snap));
        assert!(frame.contains("CLIP"));

        let quiet = strip_ansi(&frame_for(&TelemetrySnapshot::default()));
        assert!(!quiet.contains("CLIP"));
    }

    #[test]
    fn stale_tag_replaces_live_tag() {
        let snap = TelemetrySnapshot::default();
        let mut filter = MeterFilter::new();
        let readout = filter.update(&snap);
        let frame = strip_ansi(&render_meter_frame(
            &snap,
            &readout,
            &MessageLog::new(),
            Duration::ZERO,
            true,
            &Palette::default(),
        ));
        assert!(frame.contains("[STALE]"));
        assert!(!frame.contains("[LIVE]"));
    }

    #[test]
    fn messages_render_oldest_first() {
        let snap = TelemetrySnapshot::default();
        let mut filter = MeterFilter::new();
        let readout = filter.update(&snap);
        let mut log = MessageLog::new();
        log.observe("first");
        log.observe("second");

        let frame = strip_ansi(&render_meter_frame(
            &snap,
            &readout,
            &log,
            Duration::ZERO,
            false,
            &Palette::default(),
        ));
        let first_at = frame.find("first").unwrap();
        let second_at = frame.find("second").unwrap();
        assert!(first_at < second_at);
    }

    #[test]
    fn mute_flags_render_per_slot() {
        let snap = TelemetrySnapshot {
            mute_flags: vec![false, true, false],
            ..TelemetrySnapshot::default()
        };
        let frame = strip_ansi(&frame_for(&snap));
        assert!(frame.contains("·M·"));
    }

    #[test]
    fn vu_bar_has_fixed_total_width() {
        let loud = TelemetrySnapshot {
            active: true,
            vu_level: 1.0,
            sample_rate: 48_000.0,
            ..TelemetrySnapshot::default()
        };
        let frame = strip_ansi(&frame_for(&loud));
        let bar_line = frame.lines().find(|l| l.contains("vu")).unwrap();
        let cells = bar_line.chars().filter(|c| *c == '█' || *c == '░').count();
        assert_eq!(cells, BAR_SEGMENTS as usize);
    }

    #[test]
    fn human_duration_formatting() {
        assert_eq!(human_duration(30), "30s");
        assert_eq!(human_duration(90), "1m 30s");
        assert_eq!(human_duration(3600), "1h 0m");
        assert_eq!(human_duration(90000), "1d 1h");
    }
}
