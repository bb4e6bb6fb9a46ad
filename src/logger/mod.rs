//! Diagnostics logging: append-only JSONL with graceful degradation.

pub mod jsonl;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::logger::jsonl::{JsonlConfig, JsonlWriter};

/// Shared handle to the diagnostics writer.
///
/// The foreground thread logs lifecycle events, the polling thread logs
/// fault transitions; the mutex covers the writer itself.
pub type DiagHandle = Arc<Mutex<JsonlWriter>>;

/// Open the diagnostics writer behind a shared handle.
#[must_use]
pub fn open_shared(config: JsonlConfig) -> DiagHandle {
    Arc::new(Mutex::new(JsonlWriter::open(config)))
}
