#![forbid(unsafe_code)]

//! radix: an interactive number-base converter for the terminal.
//!
//! Type digits in one of binary, octal, decimal or hexadecimal and watch the
//! same value in all four. The pieces:
//!
//! - [`Base`] - the four numeral systems and their canonical text
//! - [`Converter`] - value, active base and cursor; key handling and view
//! - [`BlinkCursor`] - reverse-video cursor with epoch-tagged blink ticks
//! - [`RadixApp`] - the runtime [`Model`](radix_runtime::Model)
//! - [`Config`] - `RADIX_*` environment settings
//!
//! # Keys
//!
//! | key | action |
//! |-----|--------|
//! | digits, `a`-`f` | insert at cursor (if valid in the active base) |
//! | `left`/`h`, `right`/`l` | move cursor |
//! | `up`/`k`, `down`/`j` | switch base toward binary / hexadecimal |
//! | `backspace` | delete before cursor |
//! | `q`, `ctrl+c` | quit |

pub mod app;
pub mod base;
pub mod config;
pub mod converter;
pub mod cursor;
pub mod error;
pub mod logging;

pub use app::{Msg, RadixApp};
pub use base::Base;
pub use config::Config;
pub use converter::{Converter, KeyOutcome};
pub use cursor::{BlinkCursor, CursorMode};
pub use error::{Error, Result};

use radix_runtime::Program;

/// Read configuration, set up logging and run the converter until the user
/// quits.
pub fn run() -> Result<()> {
    let config = Config::from_env()?;
    logging::init(&config)?;

    let app = RadixApp::new(config.start_base, config.cursor());
    let mut program = Program::with_config(app, config.program_config());
    program.run().map_err(Error::Terminal)?;

    tracing::info!(value = program.model().converter().value(), "exited");
    Ok(())
}
