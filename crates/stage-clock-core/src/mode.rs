use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClockError;

/// The display mode of the stage clock. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Clock,
    Timer,
    Countdown,
    Stopwatch,
}

impl Mode {
    /// All modes, in selector order.
    pub const ALL: [Mode; 4] = [Mode::Clock, Mode::Timer, Mode::Countdown, Mode::Stopwatch];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Clock => "clock",
            Mode::Timer => "timer",
            Mode::Countdown => "countdown",
            Mode::Stopwatch => "stopwatch",
        }
    }

    /// Title-cased label for the mode selector.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Clock => "Clock",
            Mode::Timer => "Timer",
            Mode::Countdown => "Countdown",
            Mode::Stopwatch => "Stopwatch",
        }
    }

    fn index(self) -> usize {
        match self {
            Mode::Clock => 0,
            Mode::Timer => 1,
            Mode::Countdown => 2,
            Mode::Stopwatch => 3,
        }
    }

    /// The next mode in selector order, wrapping around.
    pub fn next(self) -> Mode {
        Mode::ALL[(self.index() + 1) % Mode::ALL.len()]
    }

    /// The previous mode in selector order, wrapping around.
    pub fn previous(self) -> Mode {
        Mode::ALL[(self.index() + Mode::ALL.len() - 1) % Mode::ALL.len()]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clock" => Ok(Mode::Clock),
            "timer" => Ok(Mode::Timer),
            "countdown" => Ok(Mode::Countdown),
            "stopwatch" => Ok(Mode::Stopwatch),
            _ => Err(ClockError::UnknownMode(s.to_string())),
        }
    }
}
