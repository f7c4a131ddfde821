use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the stage clock core.
///
/// Only configuration loading and user input parsing are expected to fail
/// in normal operation. Presentation failures are caught by
/// [`crate::FullscreenController`] and never reach its caller.
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {file}: {message}")]
    Config { file: PathBuf, message: String },

    #[error("invalid time {input:?}: {message}")]
    InvalidTime { input: String, message: &'static str },

    #[error("invalid duration {0:?} (expected e.g. 90, 5m, 1h30m or 05:00)")]
    InvalidDuration(String),

    #[error("invalid color {0:?} (expected #rrggbb)")]
    InvalidColor(String),

    #[error("unknown template {0:?}")]
    UnknownTemplate(String),

    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),

    #[error("unknown mode {0:?} (expected clock, timer, countdown or stopwatch)")]
    UnknownMode(String),

    #[error("unknown font family {0:?} (expected mono, sans, serif or bold)")]
    UnknownFontFamily(String),

    #[error("fullscreen presentation failed: {0}")]
    Presentation(String),
}

pub type Result<T, E = ClockError> = std::result::Result<T, E>;
