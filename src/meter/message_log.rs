//! Rolling status message history: a fixed window of 11 slots, deduplicating
//! consecutive repeats, with an explicit `"clear"` reset signal.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Number of message slots; the log always holds exactly this many.
pub const MESSAGE_SLOTS: usize = 11;

/// Engine-side signal that empties every slot instead of being stored.
pub const CLEAR_SENTINEL: &str = "clear";

/// One timestamped message slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message text; empty for unused or cleared slots.
    pub content: String,
    /// When the slot was filled.
    pub added_at: DateTime<Utc>,
}

/// Fixed-capacity FIFO message history.
///
/// Starts with [`MESSAGE_SLOTS`] empty slots; a new message evicts the
/// oldest. Poll diagnostics are routed through [`MessageLog::note`], which
/// shares the append-if-changed rule so a persistent fault produces one
/// entry, not one per tick.
#[derive(Debug, Clone)]
pub struct MessageLog {
    slots: VecDeque<Message>,
}

impl MessageLog {
    /// A log of empty slots.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        let slots = (0..MESSAGE_SLOTS)
            .map(|_| Message {
                content: String::new(),
                added_at: now,
            })
            .collect();
        Self { slots }
    }

    /// Feed the latest `infoMessage` value. The `"clear"` sentinel resets
    /// every slot's content to empty and is never stored itself.
    pub fn observe(&mut self, info: &str) {
        if info == CLEAR_SENTINEL {
            for slot in &mut self.slots {
                slot.content.clear();
            }
            return;
        }
        self.note(info);
    }

    /// Append-if-changed: push only when `content` differs from the most
    /// recent slot, evicting the oldest.
    pub fn note(&mut self, content: &str) {
        if self.latest_content() == content {
            return;
        }
        self.slots.pop_front();
        self.slots.push_back(Message {
            content: content.to_string(),
            added_at: Utc::now(),
        });
    }

    /// Content of the most recently filled slot.
    #[must_use]
    pub fn latest_content(&self) -> &str {
        self.slots.back().map_or("", |m| m.content.as_str())
    }

    /// Slots in render order: oldest first, top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.slots.iter()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}
