//! Shared path helpers: home-relative defaults and path normalization.

use std::env;
use std::path::{Component, Path, PathBuf};

/// Home directory, falling back to `/tmp` with a stderr warning when `HOME`
/// is unset (containers, stripped-down service environments).
pub fn home_dir() -> PathBuf {
    env::var_os("HOME").map_or_else(
        || {
            eprintln!("[ASC-PATHS] WARNING: HOME not set, falling back to /tmp for data paths");
            PathBuf::from("/tmp")
        },
        PathBuf::from,
    )
}

/// Default config file location: `~/.config/ascope/config.toml`.
pub fn default_config_file() -> PathBuf {
    home_dir().join(".config").join("ascope").join("config.toml")
}

/// Default data directory: `~/.local/share/ascope`.
pub fn default_data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("ascope")
}

/// Default directory the engine publishes its snapshot files into.
///
/// The engine overwrites these files many times per second, so the
/// conventional location is tmpfs-backed.
pub fn default_engine_dir() -> PathBuf {
    PathBuf::from("/tmp/audio-engine")
}

/// Resolve a path to an absolute, normalized path.
///
/// If `fs::canonicalize` succeeds (path exists), it is used to resolve symlinks
/// and normalize components.
///
/// If it fails (e.g. path does not exist), the path is made absolute relative
/// to CWD and `..`/`.` components are resolved syntactically.
pub fn resolve_absolute_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };

    // Try filesystem resolution first (handles symlinks).
    if let Ok(canonical) = std::fs::canonicalize(&absolute) {
        return canonical;
    }

    // Fallback: syntactic normalization.
    normalize_syntactic(&absolute)
}

fn normalize_syntactic(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(..) | Component::RootDir | Component::Normal(_) => {
                components.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                }
            }
        }
    }
    components.into_iter().collect()
}
