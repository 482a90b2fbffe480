#![forbid(unsafe_code)]

//! Error type for the radix binary.

use std::fmt;
use std::io;

/// Everything that can stop radix before the user quits.
#[derive(Debug)]
pub enum Error {
    /// I/O failure outside the event loop (e.g. opening the log file).
    Io(io::Error),
    /// Terminal setup or event-loop failure.
    Terminal(io::Error),
    /// An environment variable holds a value radix cannot use.
    Config {
        var: &'static str,
        value: String,
        reason: String,
    },
    /// The tracing subscriber could not be installed.
    Logging(String),
}

impl Error {
    pub(crate) fn config(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Config {
            var,
            value: value.to_owned(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Terminal(err) => write!(f, "terminal: {err}"),
            Self::Config { var, value, reason } => {
                write!(f, "invalid {var}={value:?}: {reason}")
            }
            Self::Logging(msg) => write!(f, "logging setup: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) | Self::Terminal(err) => Some(err),
            Self::Config { .. } | Self::Logging(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for radix operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_config() {
        let err = Error::config("RADIX_BLINK_MS", "fast", "expected milliseconds");
        assert_eq!(
            err.to_string(),
            "invalid RADIX_BLINK_MS=\"fast\": expected milliseconds"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn io_converts_and_keeps_source() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("gone"));
        assert!(err.source().is_some());
    }

    #[test]
    fn terminal_display() {
        let err = Error::Terminal(io::Error::other("not a tty"));
        assert_eq!(err.to_string(), "terminal: not a tty");
    }
}
