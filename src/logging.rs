// ABOUTME: File-based tracing setup for binaries embedding the tmux driver

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "agents_tmux=info";

/// `~/.agents-tmux/logs`, or a relative fallback when `HOME` is unknown.
pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".agents-tmux").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".agents-tmux/logs"))
}

/// `agents-tmux-<timestamp>.log` inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!(
        "agents-tmux-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ))
}

/// Install a global subscriber writing plain (non-ANSI) lines to a fresh log file.
///
/// Returns the path of the log file. Fails if the directory or file cannot be
/// created, or a global subscriber is already set.
pub fn init_file_logging(log_dir: Option<PathBuf>) -> Result<PathBuf> {
    let log_dir = log_dir.unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let log_file = log_file_path(&log_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to create log file: {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(log_file)
}
