//! JSONL diagnostics log: append-only line-delimited JSON.
//!
//! Each line is a self-contained JSON object. Lines are assembled in memory
//! and written with a single `write_all` so a tailing process never sees a
//! partial line. Diagnostics are low-volume (fault transitions and lifecycle
//! events, not per-tick chatter), so the degradation chain is short:
//! 1. Primary file path
//! 2. stderr with `[ASC-JSONL]` prefix
//! 3. Silent discard (a dashboard must never crash for logging failures)

#![allow(missing_docs)]

use std::fs::{self, File, OpenOptions, rename};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::config::LogConfig;
use crate::core::errors::{Result, ScopeError};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// Diagnostic event types for the dashboard lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    DashboardStart,
    DashboardStop,
    PollError,
    PollRecovered,
}

/// A single JSONL diagnostics entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagEntry {
    /// ISO 8601 UTC timestamp.
    pub ts: String,
    /// Event type identifier.
    pub event: EventKind,
    /// Severity level.
    pub severity: Severity,
    /// Originating dashboard ("meters" or "listings").
    pub component: String,
    /// Freeform details.
    pub details: String,
    /// ASC error code, when the event wraps a failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl DiagEntry {
    /// Create a new entry stamped with the current UTC time.
    pub fn new(
        event: EventKind,
        severity: Severity,
        component: &str,
        details: impl Into<String>,
    ) -> Self {
        Self {
            ts: format_utc_now(),
            event,
            severity,
            component: component.to_string(),
            details: details.into(),
            error_code: None,
        }
    }
}

/// Degradation state of the JSONL writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Normal,
    Stderr,
    Discard,
}

/// Configuration for the JSONL writer.
#[derive(Debug, Clone)]
pub struct JsonlConfig {
    /// Log file path.
    pub path: PathBuf,
    /// Maximum file size before rotation (bytes).
    pub max_size_bytes: u64,
    /// Number of rotated files to keep.
    pub max_rotated_files: u32,
}

impl From<&LogConfig> for JsonlConfig {
    fn from(value: &LogConfig) -> Self {
        Self {
            path: value.path.clone(),
            max_size_bytes: value.max_size_bytes,
            max_rotated_files: value.max_rotated_files,
        }
    }
}

/// Append-only JSONL writer with rotation and fallback to stderr.
pub struct JsonlWriter {
    config: JsonlConfig,
    writer: Option<BufWriter<File>>,
    state: WriterState,
    bytes_written: u64,
}

impl JsonlWriter {
    /// Open the log file. Falls through the degradation chain on failure.
    pub fn open(config: JsonlConfig) -> Self {
        let mut w = Self {
            config,
            writer: None,
            state: WriterState::Discard,
            bytes_written: 0,
        };
        w.try_open_primary();
        w
    }

    /// Write a single entry as one atomic JSONL line.
    pub fn write_entry(&mut self, entry: &DiagEntry) {
        let line = match serde_json::to_string(entry) {
            Ok(json) => format!("{json}\n"),
            Err(e) => {
                let _ = writeln!(io::stderr(), "[ASC-JSONL] serialize error: {e}");
                return;
            }
        };
        self.write_line(&line);
    }

    /// Flush buffers.
    pub fn flush(&mut self) {
        if let Some(w) = self.writer.as_mut() {
            let _ = w.flush();
        }
    }

    /// Current degradation state.
    pub fn state(&self) -> &str {
        match self.state {
            WriterState::Normal => "normal",
            WriterState::Stderr => "stderr",
            WriterState::Discard => "discard",
        }
    }

    // ──────────────────── internals ────────────────────

    fn write_line(&mut self, line: &str) {
        if self.state == WriterState::Normal
            && self.bytes_written + line.len() as u64 > self.config.max_size_bytes
        {
            self.rotate();
        }

        match self.state {
            WriterState::Normal => {
                if let Some(w) = self.writer.as_mut() {
                    if w.write_all(line.as_bytes()).is_err() {
                        self.degrade();
                        self.write_line(line); // retry at next level
                        return;
                    }
                    self.bytes_written += line.len() as u64;
                    // Diagnostics are low-volume fault transitions; flush
                    // per line so a tail sees them immediately.
                    let _ = w.flush();
                } else {
                    self.degrade();
                    self.write_line(line);
                }
            }
            WriterState::Stderr => {
                let _ = write!(io::stderr(), "[ASC-JSONL] {line}");
            }
            WriterState::Discard => {
                // Silently drop.
            }
        }
    }

    fn try_open_primary(&mut self) {
        match open_append(&self.config.path) {
            Ok((file, size)) => {
                self.writer = Some(BufWriter::with_capacity(8 * 1024, file));
                self.state = WriterState::Normal;
                self.bytes_written = size;
            }
            Err(_) => {
                self.state = WriterState::Stderr;
                let _ = writeln!(
                    io::stderr(),
                    "[ASC-JSONL] cannot open {}, using stderr",
                    self.config.path.display()
                );
            }
        }
    }

    fn degrade(&mut self) {
        self.writer = None;
        match self.state {
            WriterState::Normal => {
                self.state = WriterState::Stderr;
                let _ = writeln!(io::stderr(), "[ASC-JSONL] write failed, using stderr");
            }
            WriterState::Stderr => {
                self.state = WriterState::Discard;
            }
            WriterState::Discard => {}
        }
    }

    fn rotate(&mut self) {
        if let Some(w) = self.writer.as_mut() {
            let _ = w.flush();
        }
        self.writer = None;

        // Shift existing rotations: .2→.3, .1→.2, current→.1
        let base = self.config.path.clone();
        for i in (1..self.config.max_rotated_files).rev() {
            let from = rotated_name(&base, i);
            let to = rotated_name(&base, i + 1);
            let _ = rename(&from, &to);
        }
        let oldest = rotated_name(&base, self.config.max_rotated_files);
        let _ = fs::remove_file(&oldest);
        let _ = rename(&base, &rotated_name(&base, 1));

        match open_append(&base) {
            Ok((file, _)) => {
                self.writer = Some(BufWriter::with_capacity(8 * 1024, file));
                self.bytes_written = 0;
            }
            Err(_) => {
                self.degrade();
            }
        }
    }
}

// ──────────────────── helpers ────────────────────

/// Open or create a file for appending. Returns `(File, current_size)`.
fn open_append(path: &Path) -> Result<(File, u64)> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ScopeError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ScopeError::io(path, source))?;
    let size = file.metadata().map(|m| m.len()).unwrap_or(0);
    Ok((file, size))
}

/// Build a rotated filename: `foo.jsonl` → `foo.jsonl.3`.
fn rotated_name(base: &Path, index: u32) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

/// Format current UTC time as ISO 8601.
fn format_utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

// ──────────────────── tests ────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config_at(path: PathBuf) -> JsonlConfig {
        JsonlConfig {
            path,
            max_size_bytes: 1024 * 1024,
            max_rotated_files: 3,
        }
    }

    #[test]
    fn write_entry_produces_valid_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diag.jsonl");
        let mut writer = JsonlWriter::open(config_at(path.clone()));

        let entry = DiagEntry::new(
            EventKind::DashboardStart,
            Severity::Info,
            "meters",
            "started",
        );
        writer.write_entry(&entry);
        writer.flush();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["event"], "dashboard_start");
        assert_eq!(parsed["severity"], "info");
        assert_eq!(parsed["component"], "meters");
    }

    #[test]
    fn multiple_entries_are_separate_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multi.jsonl");
        let mut writer = JsonlWriter::open(config_at(path.clone()));

        for _ in 0..5 {
            writer.write_entry(&DiagEntry::new(
                EventKind::PollError,
                Severity::Warning,
                "listings",
                "snapshot missing",
            ));
        }
        writer.flush();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 5);
        for line in contents.lines() {
            let _: serde_json::Value = serde_json::from_str(line).unwrap();
        }
    }

    #[test]
    fn rotation_shifts_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rot.jsonl");
        let config = JsonlConfig {
            path: path.clone(),
            max_size_bytes: 100, // tiny: force rotation after ~1 entry
            max_rotated_files: 3,
        };
        let mut writer = JsonlWriter::open(config);

        for _ in 0..10 {
            writer.write_entry(&DiagEntry::new(
                EventKind::PollError,
                Severity::Warning,
                "meters",
                "snapshot missing",
            ));
        }
        writer.flush();

        assert!(path.exists());
        assert!(rotated_name(&path, 1).exists());
    }

    #[test]
    fn unwritable_path_degrades_to_stderr() {
        let config = config_at(PathBuf::from(
            "/nonexistent_ascope_test_dir_12345/diag.jsonl",
        ));
        let mut writer = JsonlWriter::open(config);
        assert_eq!(writer.state(), "stderr");
        // Writing must not panic.
        writer.write_entry(&DiagEntry::new(
            EventKind::PollError,
            Severity::Warning,
            "meters",
            "still alive",
        ));
    }

    #[test]
    fn state_reports_normal_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonlWriter::open(config_at(dir.path().join("ok.jsonl")));
        assert_eq!(writer.state(), "normal");
    }

    #[test]
    fn error_code_omitted_when_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sparse.jsonl");
        let mut writer = JsonlWriter::open(config_at(path.clone()));

        writer.write_entry(&DiagEntry::new(
            EventKind::DashboardStop,
            Severity::Info,
            "meters",
            "closed",
        ));
        writer.flush();

        let line = fs::read_to_string(&path).unwrap();
        assert!(!line.contains("error_code"));
    }

    #[test]
    fn config_derives_from_log_section() {
        let log = LogConfig {
            path: PathBuf::from("/tmp/x.jsonl"),
            max_size_bytes: 42,
            max_rotated_files: 9,
        };
        let config = JsonlConfig::from(&log);
        assert_eq!(config.path, PathBuf::from("/tmp/x.jsonl"));
        assert_eq!(config.max_size_bytes, 42);
        assert_eq!(config.max_rotated_files, 9);
    }
}
