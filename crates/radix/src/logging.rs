#![forbid(unsafe_code)]

//! Tracing setup.
//!
//! The UI owns the terminal, so log output only goes to a file, and only
//! when `RADIX_LOG_FILE` is set. Without it no subscriber is installed and
//! every `tracing` call is a no-op.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{Error, Result};

/// Install the global subscriber described by `config`.
///
/// Returns `Ok(false)` when file logging is disabled.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(false);
    };

    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|err| Error::Logging(format!("{}: {err}", config.log_filter)))?;
    let file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| Error::Logging(err.to_string()))?;

    tracing::info!(path = %path.display(), filter = %config.log_filter, "file logging enabled");
    Ok(true)
}

fn open_log_file(path: &Path) -> Result<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
