//! Listing snapshot schema: active jobs as operator/operand sequences, plus
//! the mute/verbose view state embedded in the telemetry file.
//!
//! The listing file is a JSON array of arrays of `{"Op": …, "Opd": …}`
//! objects. Two markers get special treatment: a single-entry listing whose
//! op is `"deleted"` is a tombstoned slot (kept in the decoded sequence,
//! never rendered), and a leading `"/*"` entry carries a free-text
//! annotation in its operand.

use serde::Deserialize;

/// Operator marker for a tombstoned (deleted but slot-retained) listing.
pub const TOMBSTONE_OP: &str = "deleted";

/// Operator marker for a leading free-text annotation.
pub const COMMENT_OP: &str = "/*";

/// One operator/operand pair inside a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListingEntry {
    #[serde(rename = "Op")]
    pub op: String,
    #[serde(rename = "Opd")]
    pub opd: String,
}

impl ListingEntry {
    /// Convenience constructor used by tests and fixtures.
    #[must_use]
    pub fn new(op: impl Into<String>, opd: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            opd: opd.into(),
        }
    }
}

/// One active job: an ordered operator/operand sequence.
pub type Listing = Vec<ListingEntry>;

/// Whether a listing is a tombstoned slot.
#[must_use]
pub fn is_tombstone(listing: &[ListingEntry]) -> bool {
    listing.first().is_some_and(|e| e.op == TOMBSTONE_OP)
}

/// Leading annotation text, if the listing starts with a comment entry.
#[must_use]
pub fn leading_comment(listing: &[ListingEntry]) -> Option<&str> {
    listing
        .first()
        .filter(|e| e.op == COMMENT_OP)
        .map(|e| e.opd.as_str())
}

/// Mute/verbose view state, decoded independently from the telemetry file's
/// raw JSON (keys `Mute` and `Verbose`). Compared by value across polls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MuteVerboseState {
    #[serde(rename = "Mute")]
    pub mute: Vec<bool>,
    #[serde(rename = "Verbose")]
    pub verbose: bool,
}

impl MuteVerboseState {
    /// Bounds-checked mute lookup: positions past the end of the mute
    /// sequence are not muted.
    #[must_use]
    pub fn is_muted(&self, index: usize) -> bool {
        self.mute.get(index).copied().unwrap_or(false)
    }
}
