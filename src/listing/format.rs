//! Operator-stream formatting for the listing dashboard.
//!
//! Rendering rules:
//! - tombstoned listings are skipped entirely (the slot still counts for
//!   mute indexing);
//! - a leading `"/*"` entry renders its operand as an annotation line and is
//!   excluded from the operator stream;
//! - generator/noise operators get the highlight color;
//! - a muted slot renders all of its operators and operands de-emphasized,
//!   overriding the generator highlight;
//! - non-verbose: a line break before block-start operators, a comma
//!   otherwise; verbose: every element carries its positional index and
//!   separators are suppressed.

use std::fmt::Write as _;

use crossterm::style::{Stylize, style};

use crate::render::palette::Palette;
use crate::snapshot::listing::{
    Listing, ListingEntry, MuteVerboseState, is_tombstone, leading_comment,
};

/// Operators rendered with the highlight color: signal generators and noise
/// sources. Membership test only.
pub const GENERATOR_OPS: &[&str] = &[
    "osc", "sin", "saw", "tri", "pulse", "noise", "pink", "brown", "impulse", "phasor",
];

/// Operators that open a new line in non-verbose mode.
pub const BLOCK_START_OPS: &[&str] = &["seq", "par", "mix", "env", "out", "send"];

/// Whether an operator belongs to the generator/noise highlight set.
#[must_use]
pub fn is_generator_op(op: &str) -> bool {
    GENERATOR_OPS.contains(&op)
}

/// Whether an operator starts a new block in non-verbose mode.
#[must_use]
pub fn is_block_start_op(op: &str) -> bool {
    BLOCK_START_OPS.contains(&op)
}

/// Format one listing. Returns `None` for tombstoned slots. Internal line
/// breaks use `'\n'`; the frame renderer owns terminal line endings.
#[must_use]
pub fn format_listing(
    listing: &[ListingEntry],
    muted: bool,
    verbose: bool,
    palette: &Palette,
) -> Option<String> {
    if is_tombstone(listing) {
        return None;
    }

    let mut out = String::new();

    let comment = leading_comment(listing);
    if let Some(annotation) = comment {
        let styled = if muted {
            style(format!("; {annotation}")).with(palette.muted).italic()
        } else {
            style(format!("; {annotation}"))
                .with(palette.annotation)
                .italic()
        };
        let _ = writeln!(out, "{styled}");
    }

    let stream = if comment.is_some() {
        &listing[1..]
    } else {
        listing
    };

    for (index, entry) in stream.iter().enumerate() {
        if verbose {
            if index > 0 {
                out.push(' ');
            }
            let prefix = style(format!("#{index}")).with(palette.dim);
            let _ = write!(out, "{prefix} ");
        } else if index > 0 {
            if is_block_start_op(&entry.op) {
                out.push('\n');
            } else {
                out.push_str(", ");
            }
        }

        let op_styled = if muted {
            style(entry.op.as_str()).with(palette.muted).italic()
        } else if is_generator_op(&entry.op) {
            style(entry.op.as_str()).with(palette.highlight).bold()
        } else {
            style(entry.op.as_str()).with(palette.text)
        };
        let _ = write!(out, "{op_styled}");

        if !entry.opd.is_empty() {
            let opd_styled = if muted {
                style(entry.opd.as_str()).with(palette.muted).italic()
            } else {
                style(entry.opd.as_str()).with(palette.text)
            };
            let _ = write!(out, " {opd_styled}");
        }
    }

    Some(out)
}

/// Format all listings in slot order, applying the mute flag for each slot
/// position. Tombstoned slots produce no output but keep their index.
#[must_use]
pub fn format_listings(
    listings: &[Listing],
    state: &MuteVerboseState,
    palette: &Palette,
) -> Vec<String> {
    listings
        .iter()
        .enumerate()
        .filter_map(|(slot, listing)| {
            format_listing(listing, state.is_muted(slot), state.verbose, palette)
        })
        .filter(|block| !block.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::strip_ansi;

    fn plain() -> Palette {
        Palette::monochrome()
    }

    fn entry(op: &str, opd: &str) -> ListingEntry {
        ListingEntry::new(op, opd)
    }

    fn formatted_text(listing: &[ListingEntry], muted: bool, verbose: bool) -> String {
        strip_ansi(&format_listing(listing, muted, verbose, &plain()).unwrap())
    }

    #[test]
    fn tombstone_renders_nothing() {
        let listing = vec![entry("deleted", "")];
        assert!(format_listing(&listing, false, false, &plain()).is_none());
    }

    #[test]
    fn tombstoned_slot_keeps_its_mute_index() {
        // Slot 1 is a tombstone; slot 2 is muted. The mute flag must apply
        // by slot position, not by rendered position.
        let listings = vec![
            vec![entry("osc", "440")],
            vec![entry("deleted", "")],
            vec![entry("gain", "0.5")],
        ];
        let state = MuteVerboseState {
            mute: vec![false, false, true],
            verbose: false,
        };
        let palette = Palette::default();
        let lines = format_listings(&listings, &state, &palette);
        assert_eq!(lines.len(), 2);
        // Muted rendering carries the italic attribute escape.
        assert!(!lines[0].contains("\u{1b}[3m"));
        assert!(lines[1].contains("\u{1b}[3m"));
    }

    #[test]
    fn comment_renders_as_annotation_only() {
        let listing = vec![entry("/*", "drum bus"), entry("gain", "0.5")];
        let text = formatted_text(&listing, false, false);
        assert!(text.contains("; drum bus"));
        // The comment marker itself never reaches the operator stream.
        assert!(!text.contains("/*"));
        assert!(text.contains("gain 0.5"));
    }

    #[test]
    fn non_verbose_separates_with_commas() {
        let listing = vec![entry("osc", "440"), entry("gain", "0.5")];
        let text = formatted_text(&listing, false, false);
        assert_eq!(text, "osc 440, gain 0.5");
    }

    #[test]
    fn block_start_operator_breaks_the_line() {
        let listing = vec![entry("osc", "440"), entry("out", "main")];
        let text = formatted_text(&listing, false, false);
        assert_eq!(text, "osc 440\nout main");
    }

    #[test]
    fn verbose_prefixes_indices_and_suppresses_separators() {
        let listing = vec![entry("osc", "440"), entry("out", "main")];
        let text = formatted_text(&listing, false, true);
        assert_eq!(text, "#0 osc 440 #1 out main");
        assert!(!text.contains(','));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn generator_ops_are_highlighted() {
        let palette = Palette::default();
        let highlighted = format_listing(&[entry("osc", "440")], false, false, &palette).unwrap();
        let plain_op = format_listing(&[entry("gain", "0.5")], false, false, &palette).unwrap();
        // Green foreground + bold for the generator; neither on a plain op.
        assert!(highlighted.contains("\u{1b}[38;5;10m"));
        assert!(highlighted.contains("\u{1b}[1m"));
        assert!(!plain_op.contains("\u{1b}[38;5;10m"));
        assert!(!plain_op.contains("\u{1b}[1m"));
    }

    #[test]
    fn mute_overrides_generator_highlight() {
        let palette = Palette::default();
        let listing = vec![entry("osc", "440")];
        let text = format_listing(&listing, true, false, &palette).unwrap();
        // De-emphasized style, no green highlight.
        assert!(!text.contains("\u{1b}[38;5;10m"));
        assert!(text.contains("\u{1b}[3m"));
    }

    #[test]
    fn operand_free_entries_render_bare() {
        let listing = vec![entry("rev", "")];
        let text = formatted_text(&listing, false, false);
        assert_eq!(text, "rev");
    }

    #[test]
    fn operator_sets_are_disjoint() {
        for op in GENERATOR_OPS {
            assert!(!BLOCK_START_OPS.contains(op), "{op} must not be in both sets");
        }
    }
}
