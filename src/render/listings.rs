//! Listing dashboard frame builder.
//!
//! Pure function of the decoded listings and the mute/verbose view state.
//! Emitted only when [`crate::listing::diff::ListingDiffTracker`] reports a
//! change; an unchanged poll produces no output at all.

use std::fmt::Write as _;

use crossterm::Command;
use crossterm::cursor::MoveTo;
use crossterm::style::{Stylize, style};
use crossterm::terminal::{Clear, ClearType};

use crate::listing::format::format_listings;
use crate::render::palette::Palette;
use crate::render::visible_width;
use crate::snapshot::listing::{Listing, MuteVerboseState, is_tombstone};

/// Fixed frame width in columns.
const FRAME_WIDTH: usize = 72;

/// Fixed closing hint shown in the footer.
const FOOTER_HINT: &str = " Press Enter to exit ";

/// Build one listing frame.
#[must_use]
pub fn render_listing_frame(
    listings: &[Listing],
    state: &MuteVerboseState,
    palette: &Palette,
) -> String {
    let mut frame = String::new();
    let _ = MoveTo(0, 0).write_ansi(&mut frame);
    let _ = Clear(ClearType::All).write_ansi(&mut frame);

    // ── Header ──
    let active = listings.iter().filter(|l| !is_tombstone(l)).count();
    let mode = if state.verbose {
        format!("{}", style("[VERBOSE]").with(palette.warn))
    } else {
        String::new()
    };
    let title = format!("┌─ ascope listings  {mode}");
    let counts = format!("{active} active / {} slots ─┐", listings.len());
    let pad = FRAME_WIDTH.saturating_sub(visible_width(&title) + visible_width(&counts) + 2);
    let _ = writeln!(
        frame,
        "{}{:─<pad$} {counts}\r",
        style(title).with(palette.frame).bold(),
        "",
    );
    frame.push_str("\r\n");

    // ── Listings ──
    let rendered = format_listings(listings, state, palette);
    if rendered.is_empty() {
        let _ = writeln!(frame, "  {}\r", style("(no active listings)").with(palette.dim));
    } else {
        for block in rendered {
            for line in block.split('\n') {
                let _ = writeln!(frame, "  {line}\r");
            }
            frame.push_str("\r\n");
        }
    }

    // ── Footer ──
    let pad = FRAME_WIDTH.saturating_sub(FOOTER_HINT.len() + 4);
    let _ = write!(
        frame,
        "{}",
        style(format!("└─{FOOTER_HINT}{:─<pad$}─┘", "")).with(palette.frame),
    );

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::strip_ansi;
    use crate::snapshot::listing::ListingEntry;

    fn listing(entries: &[(&str, &str)]) -> Listing {
        entries
            .iter()
            .map(|(op, opd)| ListingEntry::new(*op, *opd))
            .collect()
    }

    #[test]
    fn frame_is_bracketed_by_home_and_clear() {
        let frame = render_listing_frame(&[], &MuteVerboseState::default(), &Palette::default());
        assert!(frame.starts_with("\u{1b}[1;1H\u{1b}[2J"));
    }

    #[test]
    fn empty_listings_render_placeholder() {
        let frame = strip_ansi(&render_listing_frame(
            &[],
            &MuteVerboseState::default(),
            &Palette::default(),
        ));
        assert!(frame.contains("(no active listings)"));
        assert!(frame.contains("0 active / 0 slots"));
    }

    #[test]
    fn tombstones_count_as_slots_but_never_render() {
        let listings = vec![
            listing(&[("osc", "440")]),
            listing(&[("deleted", "")]),
        ];
        let frame = strip_ansi(&render_listing_frame(
            &listings,
            &MuteVerboseState::default(),
            &Palette::default(),
        ));
        assert!(frame.contains("1 active / 2 slots"));
        assert!(frame.contains("osc 440"));
        assert!(!frame.contains("deleted"));
    }

    #[test]
    fn verbose_tag_appears_in_header() {
        let state = MuteVerboseState {
            mute: Vec::new(),
            verbose: true,
        };
        let frame = strip_ansi(&render_listing_frame(&[], &state, &Palette::default()));
        assert!(frame.contains("[VERBOSE]"));
    }

    #[test]
    fn annotation_lines_are_indented_with_stream() {
        let listings = vec![listing(&[("/*", "drum bus"), ("gain", "0.5")])];
        let frame = strip_ansi(&render_listing_frame(
            &listings,
            &MuteVerboseState::default(),
            &Palette::default(),
        ));
        assert!(frame.contains("  ; drum bus"));
        assert!(frame.contains("  gain 0.5"));
    }

    #[test]
    fn footer_carries_exit_hint() {
        let frame = strip_ansi(&render_listing_frame(
            &[],
            &MuteVerboseState::default(),
            &Palette::default(),
        ));
        assert!(frame.contains("Press Enter to exit"));
    }
}
