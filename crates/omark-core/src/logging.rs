//! Logging init: file under the XDG state dir, or stderr when that fails.

use anyhow::Result;
use std::fs;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,omark_core=debug,omark_cli=debug";

/// Initialize structured logging to `~/.local/state/omark/omark.log`.
/// Returns Err when the state dir is unusable so the caller can fall back to
/// `init_logging_stderr`.
pub fn init_logging() -> Result<()> {
    let state_dir = xdg::BaseDirectories::with_prefix("omark")?.get_state_home();
    fs::create_dir_all(&state_dir)?;
    let log_path = state_dir.join("omark.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("omark logging initialized at {}", log_path.display());
    Ok(())
}

/// Stderr-only init, used when `init_logging` cannot open the log file.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
