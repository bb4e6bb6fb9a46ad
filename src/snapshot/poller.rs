//! Best-effort snapshot file polling.
//!
//! The snapshot files are owned by the engine process, which overwrites them
//! on its own cadence. A read can therefore race a concurrent overwrite and
//! come back missing or momentarily malformed; both are classified as
//! retryable failures and the caller keeps its previous in-memory state.
//! Nothing is retried synchronously — the next poll tick is the retry.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::de::DeserializeOwned;

use crate::core::errors::{Result, ScopeError};

/// Reads and decodes one snapshot file into `T` on each poll tick.
#[derive(Debug)]
pub struct SnapshotPoller<T> {
    path: PathBuf,
    _decoded: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> SnapshotPoller<T> {
    /// Create a poller for the given snapshot file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _decoded: PhantomData,
        }
    }

    /// Snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Attempt one read+decode. Failures distinguish unreadable files
    /// (ASC-2001) from undecodable content (ASC-2002); both are retryable.
    pub fn read(&self) -> Result<T> {
        let raw = fs::read_to_string(&self.path).map_err(|source| ScopeError::SnapshotRead {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|e| ScopeError::SnapshotDecode {
            path: self.path.clone(),
            details: e.to_string(),
        })
    }

    /// Last modification time of the snapshot file, when the file and its
    /// metadata are reachable. `None` otherwise — absence is itself a
    /// comparable state for redraw suppression.
    #[must_use]
    pub fn modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }
}
