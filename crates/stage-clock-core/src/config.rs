//! Startup configuration (`stage-clock/config.json`).
//!
//! The file only supplies defaults for a session. Nothing is written back:
//! changes made through the customizer last until the program exits.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ClockError, Result};
use crate::mode::Mode;
use crate::settings::ClockSettings;
use crate::timer::DEFAULT_TIMER_SECONDS;
use crate::timezone::DisplayZone;

/// Allowed stopwatch refresh periods, in milliseconds.
pub const STOPWATCH_TICK_MS_RANGE: std::ops::RangeInclusive<u64> = 10..=1000;

const CONFIG_DIR: &str = "stage-clock";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageClockConfig {
    pub settings: ClockSettings,
    pub initial_mode: Mode,
    /// Configured timer duration in seconds.
    pub timer_seconds: u64,
    /// `"local"` or an IANA zone name.
    pub timezone: String,
    pub stopwatch_tick_ms: u64,
    /// Ring the terminal bell when the timer or a countdown finishes.
    pub bell_on_finish: bool,
}

impl Default for StageClockConfig {
    fn default() -> Self {
        Self {
            settings: ClockSettings::default(),
            initial_mode: Mode::Clock,
            timer_seconds: DEFAULT_TIMER_SECONDS,
            timezone: "local".to_string(),
            stopwatch_tick_ms: 100,
            bell_on_finish: false,
        }
    }
}

impl StageClockConfig {
    /// `$XDG_CONFIG_HOME/stage-clock/config.json` (or the platform
    /// equivalent). `None` when the platform has no config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: StageClockConfig =
            serde_json::from_str(&text).map_err(|e| ClockError::Config {
                file: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validated(path)
    }

    /// Load `explicit` if given; otherwise the default path if that file
    /// exists; otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// The configured display zone.
    pub fn zone(&self) -> Result<DisplayZone> {
        DisplayZone::parse(&self.timezone)
    }

    fn validated(mut self, path: &Path) -> Result<Self> {
        self.zone().map_err(|e| ClockError::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.settings = self.settings.normalized();
        self.stopwatch_tick_ms = self
            .stopwatch_tick_ms
            .clamp(*STOPWATCH_TICK_MS_RANGE.start(), *STOPWATCH_TICK_MS_RANGE.end());
        Ok(self)
    }
}
