//! Global tracing subscriber
//!
//! The terminal belongs to the UI, so diagnostics go to a log file.

use anyhow::Context;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "scribe=info";

/// Log file used when none is given on the command line
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("scribe.log")
}

/// `RUST_LOG` if set and valid, otherwise [`DEFAULT_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber, appending to `log_file`
pub fn init_global(log_file: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false),
        )
        .with(env_filter())
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(())
}
