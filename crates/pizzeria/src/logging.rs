#![forbid(unsafe_code)]

//! Tracing setup for the binary.
//!
//! The form owns the terminal, so log output goes to a file or nowhere.

use crate::config::AppConfig;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber if a log file is configured.
///
/// Returns `Ok(false)` when logging stays off: no file was configured, or a
/// subscriber was already installed. An unparsable filter falls back to
/// `info`.
pub fn init(config: &AppConfig) -> io::Result<bool> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let (filter, bad_filter) = match EnvFilter::try_new(&config.log_filter) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err)),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        if let Some(err) = bad_filter {
            tracing::warn!(filter = %config.log_filter, error = %err, "invalid log filter, using info");
        }
        tracing::info!(path = %path.display(), "logging started");
    }
    Ok(installed)
}
