//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, ScopeError};
use crate::core::paths;

/// Full ascope configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub files: FilesConfig,
    pub meters: MetersConfig,
    pub listings: ListingsConfig,
    pub log: LogConfig,
    /// Effective config file path (populated by [`Config::load`]).
    #[serde(skip)]
    pub config_file: PathBuf,
}

/// Snapshot file locations. Both files are owned and overwritten by the
/// engine process; ascope only ever reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FilesConfig {
    pub telemetry_file: PathBuf,
    pub listing_file: PathBuf,
}

/// Telemetry (meters) dashboard cadence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MetersConfig {
    pub poll_interval_ms: u64,
}

/// Listing dashboard cadence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListingsConfig {
    pub poll_interval_ms: u64,
}

/// JSONL diagnostics log settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub path: PathBuf,
    pub max_size_bytes: u64,
    pub max_rotated_files: u32,
}

impl Default for FilesConfig {
    fn default() -> Self {
        let engine_dir = paths::default_engine_dir();
        Self {
            telemetry_file: engine_dir.join("telemetry.json"),
            listing_file: engine_dir.join("listing.json"),
        }
    }
}

impl Default for MetersConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 20,
        }
    }
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 300,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: paths::default_data_dir().join("diagnostics.jsonl"),
            max_size_bytes: 10 * 1024 * 1024, // 10 MiB
            max_rotated_files: 3,
        }
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        paths::default_config_file()
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from the default
    /// path; defaults are used. An explicitly-passed missing path is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| ScopeError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(ScopeError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.config_file = path_buf;
        cfg.apply_env_overrides_from(|key| env::var(key).ok())?;
        cfg.normalize_paths();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `ASCOPE_*` overrides via a pluggable lookup (injected in tests).
    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        set_path("ASCOPE_TELEMETRY_FILE", &mut lookup, &mut self.files.telemetry_file);
        set_path("ASCOPE_LISTING_FILE", &mut lookup, &mut self.files.listing_file);

        set_u64(
            "ASCOPE_METERS_POLL_INTERVAL_MS",
            &mut lookup,
            &mut self.meters.poll_interval_ms,
        )?;
        set_u64(
            "ASCOPE_LISTINGS_POLL_INTERVAL_MS",
            &mut lookup,
            &mut self.listings.poll_interval_ms,
        )?;

        set_path("ASCOPE_LOG_PATH", &mut lookup, &mut self.log.path);
        set_u64(
            "ASCOPE_LOG_MAX_SIZE_BYTES",
            &mut lookup,
            &mut self.log.max_size_bytes,
        )?;
        set_u32(
            "ASCOPE_LOG_MAX_ROTATED_FILES",
            &mut lookup,
            &mut self.log.max_rotated_files,
        )?;

        Ok(())
    }

    /// Normalize snapshot paths for consistent comparison and display.
    fn normalize_paths(&mut self) {
        self.files.telemetry_file = paths::resolve_absolute_path(&self.files.telemetry_file);
        self.files.listing_file = paths::resolve_absolute_path(&self.files.listing_file);
    }

    fn validate(&self) -> Result<()> {
        if self.meters.poll_interval_ms == 0 {
            return Err(ScopeError::InvalidConfig {
                details: "meters.poll_interval_ms must be > 0".to_string(),
            });
        }
        if self.listings.poll_interval_ms == 0 {
            return Err(ScopeError::InvalidConfig {
                details: "listings.poll_interval_ms must be > 0".to_string(),
            });
        }
        if self.log.max_size_bytes == 0 {
            return Err(ScopeError::InvalidConfig {
                details: "log.max_size_bytes must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

// ──────────────────── env override helpers ────────────────────

fn set_u64<F>(key: &str, lookup: &mut F, target: &mut u64) -> Result<()>
where
    F: FnMut(&str) -> Option<String>,
{
    if let Some(raw) = lookup(key) {
        *target = raw.trim().parse().map_err(|_| ScopeError::InvalidConfig {
            details: format!("{key} must be an unsigned integer, got {raw:?}"),
        })?;
    }
    Ok(())
}

fn set_u32<F>(key: &str, lookup: &mut F, target: &mut u32) -> Result<()>
where
    F: FnMut(&str) -> Option<String>,
{
    if let Some(raw) = lookup(key) {
        *target = raw.trim().parse().map_err(|_| ScopeError::InvalidConfig {
            details: format!("{key} must be an unsigned integer, got {raw:?}"),
        })?;
    }
    Ok(())
}

fn set_path<F>(key: &str, lookup: &mut F, target: &mut PathBuf)
where
    F: FnMut(&str) -> Option<String>,
{
    if let Some(raw) = lookup(key) {
        *target = PathBuf::from(raw);
    }
}
