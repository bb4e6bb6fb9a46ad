#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use std::time::{SystemTime, UNIX_EPOCH};

pub struct CmdResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub log_path: PathBuf,
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn resolve_bin_path() -> PathBuf {
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_ascope") {
        return PathBuf::from(path);
    }

    let exe_name = if cfg!(windows) { "ascope.exe" } else { "ascope" };
    let fallback = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .and_then(|deps| deps.parent().map(PathBuf::from))
        .map(|debug_dir| debug_dir.join(exe_name));

    match fallback {
        Some(path) if path.exists() => path,
        _ => panic!("unable to resolve ascope binary path for integration test"),
    }
}

/// Run the binary with args, capturing output and writing a per-case log.
pub fn run_cli_case(name: &str, args: &[&str]) -> CmdResult {
    run_cli_case_env(name, args, &[])
}

/// Same as [`run_cli_case`] with extra environment variables.
pub fn run_cli_case_env(name: &str, args: &[&str], env: &[(&str, &str)]) -> CmdResult {
    let bin = resolve_bin_path();
    let mut cmd = Command::new(&bin);
    cmd.args(args).env("NO_COLOR", "1");
    for (key, value) in env {
        cmd.env(key, value);
    }

    let output = cmd
        .output()
        .unwrap_or_else(|e| panic!("failed to run {}: {e}", bin.display()));

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    let log_dir = std::env::temp_dir().join("ascope-integration-logs");
    let _ = fs::create_dir_all(&log_dir);
    let log_path = log_dir.join(format!("{}-{}.log", sanitize(name), now_millis()));
    let _ = fs::write(
        &log_path,
        format!(
            "args: {args:?}\nenv: {env:?}\nstatus: {:?}\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}\n",
            output.status,
        ),
    );

    CmdResult {
        status: output.status,
        stdout,
        stderr,
        log_path,
    }
}
