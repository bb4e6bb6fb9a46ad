//! Dashboard color palette: one immutable value captured by the renderers.

use crossterm::style::Color;

/// Color assignments for both dashboards.
///
/// Constructed once at startup and passed by value; renderers never consult
/// process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Header/footer chrome.
    pub frame: Color,
    /// Ordinary values and labels.
    pub text: Color,
    /// Empty slots, placeholders, stale hints.
    pub dim: Color,
    /// Overload sentinel, clip indicator.
    pub alert: Color,
    /// Load above the alert threshold, gain-reduction indicator.
    pub warn: Color,
    /// Generator/noise operators in listings.
    pub highlight: Color,
    /// Muted listing positions (overrides the generator highlight).
    pub muted: Color,
    /// Leading listing annotations.
    pub annotation: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            frame: Color::Cyan,
            text: Color::White,
            dim: Color::DarkGrey,
            alert: Color::Red,
            warn: Color::Yellow,
            highlight: Color::Green,
            muted: Color::DarkGrey,
            annotation: Color::DarkYellow,
        }
    }
}

impl Palette {
    /// All-reset palette for `--no-color` runs; attribute styling
    /// (bold/italic) still applies.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            frame: Color::Reset,
            text: Color::Reset,
            dim: Color::Reset,
            alert: Color::Reset,
            warn: Color::Reset,
            highlight: Color::Reset,
            muted: Color::Reset,
            annotation: Color::Reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_distinguishes_alert_from_text() {
        let p = Palette::default();
        assert_ne!(p.alert, p.text);
        assert_ne!(p.highlight, p.muted);
    }

    #[test]
    fn monochrome_uses_reset_everywhere() {
        let p = Palette::monochrome();
        assert_eq!(p.alert, Color::Reset);
        assert_eq!(p.highlight, Color::Reset);
        assert_eq!(p.frame, Color::Reset);
    }
}
