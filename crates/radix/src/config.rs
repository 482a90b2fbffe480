#![forbid(unsafe_code)]

//! Startup configuration from `RADIX_*` environment variables.
//!
//! | variable | meaning | default |
//! |----------|---------|---------|
//! | `RADIX_BLINK_MS` | cursor blink interval in ms, > 0 | 530 |
//! | `RADIX_CURSOR` | `blink`, `static` or `hide` | `blink` |
//! | `RADIX_SCREEN` | `inline` or `alt` | `inline` |
//! | `RADIX_START_BASE` | `bin`, `oct`, `dec` or `hex` | `dec` |
//! | `RADIX_LOG_FILE` | write tracing output to this file | unset |
//! | `RADIX_LOG` | tracing filter directives | `info` |
//!
//! Empty values count as unset.

use std::path::PathBuf;
use std::time::Duration;

use radix_runtime::{ProgramConfig, ScreenMode};
use tracing_subscriber::EnvFilter;

use crate::base::Base;
use crate::cursor::{BlinkCursor, CursorMode};
use crate::error::{Error, Result};

pub const BLINK_MS_VAR: &str = "RADIX_BLINK_MS";
pub const CURSOR_VAR: &str = "RADIX_CURSOR";
pub const SCREEN_VAR: &str = "RADIX_SCREEN";
pub const START_BASE_VAR: &str = "RADIX_START_BASE";
pub const LOG_FILE_VAR: &str = "RADIX_LOG_FILE";
pub const LOG_VAR: &str = "RADIX_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub blink_interval: Duration,
    pub cursor_mode: CursorMode,
    pub screen_mode: ScreenMode,
    pub start_base: Base,
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blink_interval: BlinkCursor::DEFAULT_INTERVAL,
            cursor_mode: CursorMode::Blink,
            screen_mode: ScreenMode::Inline,
            start_base: Base::Decimal,
            log_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl Config {
    /// Read the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from any variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(BLINK_MS_VAR) {
            let ms = value
                .trim()
                .parse::<u64>()
                .map_err(|_| Error::config(BLINK_MS_VAR, &value, "expected milliseconds"))?;
            if ms == 0 {
                return Err(Error::config(BLINK_MS_VAR, &value, "must be greater than 0"));
            }
            config.blink_interval = Duration::from_millis(ms);
        }

        if let Some(value) = get(CURSOR_VAR) {
            config.cursor_mode = CursorMode::from_name(value.trim()).ok_or_else(|| {
                Error::config(CURSOR_VAR, &value, "expected blink, static or hide")
            })?;
        }

        if let Some(value) = get(SCREEN_VAR) {
            config.screen_mode = match value.trim().to_ascii_lowercase().as_str() {
                "inline" => ScreenMode::Inline,
                "alt" | "altscreen" | "alt-screen" | "alt_screen" => ScreenMode::AltScreen,
                _ => return Err(Error::config(SCREEN_VAR, &value, "expected inline or alt")),
            };
        }

        if let Some(value) = get(START_BASE_VAR) {
            config.start_base = Base::from_label(value.trim()).ok_or_else(|| {
                Error::config(START_BASE_VAR, &value, "expected bin, oct, dec or hex")
            })?;
        }

        config.log_file = get(LOG_FILE_VAR).map(PathBuf::from);

        if let Some(value) = get(LOG_VAR) {
            EnvFilter::try_new(&value)
                .map_err(|err| Error::config(LOG_VAR, &value, err.to_string()))?;
            config.log_filter = value;
        }

        Ok(config)
    }

    /// Runtime settings derived from this config.
    pub fn program_config(&self) -> ProgramConfig {
        ProgramConfig {
            screen_mode: self.screen_mode,
            ..ProgramConfig::default()
        }
    }

    /// The cursor this config describes.
    pub fn cursor(&self) -> BlinkCursor {
        BlinkCursor::new(self.cursor_mode, self.blink_interval)
    }
}
