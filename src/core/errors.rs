//! ASC-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Top-level error type for Audio Scope Helper.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("[ASC-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[ASC-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[ASC-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[ASC-2001] snapshot read failure for {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[ASC-2002] snapshot decode failure for {path}: {details}")]
    SnapshotDecode { path: PathBuf, details: String },

    #[error("[ASC-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[ASC-3001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[ASC-3002] channel closed in component {component}")]
    ChannelClosed { component: &'static str },

    #[error("[ASC-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl ScopeError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "ASC-1001",
            Self::MissingConfig { .. } => "ASC-1002",
            Self::ConfigParse { .. } => "ASC-1003",
            Self::SnapshotRead { .. } => "ASC-2001",
            Self::SnapshotDecode { .. } => "ASC-2002",
            Self::Serialization { .. } => "ASC-2101",
            Self::Io { .. } => "ASC-3001",
            Self::ChannelClosed { .. } => "ASC-3002",
            Self::Runtime { .. } => "ASC-3900",
        }
    }

    /// Whether retrying might resolve the failure.
    ///
    /// Snapshot read/decode failures are the canonical retryable case: the
    /// producing engine may be mid-overwrite, and the next poll tick is the
    /// retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::SnapshotRead { .. }
                | Self::SnapshotDecode { .. }
                | Self::Io { .. }
                | Self::ChannelClosed { .. }
                | Self::Runtime { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for ScopeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for ScopeError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
