use chrono::{DateTime, Days, NaiveDateTime, NaiveTime, Utc};

use crate::error::{ClockError, Result};
use crate::format::format_countdown;
use crate::timezone::DisplayZone;

/// A user-entered countdown target, before it is pinned to an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetInput {
    /// `HH:MM` today; rolls over to tomorrow if that time has passed.
    TimeOfDay(NaiveTime),
    /// An explicit date and time, used exactly as given.
    DateTime(NaiveDateTime),
}

const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

impl TargetInput {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        for fmt in TIME_FORMATS {
            if let Ok(time) = NaiveTime::parse_from_str(trimmed, fmt) {
                return Ok(TargetInput::TimeOfDay(time));
            }
        }
        for fmt in DATE_TIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Ok(TargetInput::DateTime(dt));
            }
        }
        Err(ClockError::InvalidTime {
            input: input.to_string(),
            message: "expected HH:MM or YYYY-MM-DD HH:MM",
        })
    }

    /// Pin the input to an instant, reading wall-clock values in `zone`.
    pub fn resolve(self, zone: &DisplayZone, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let missing = |naive: NaiveDateTime| ClockError::InvalidTime {
            input: naive.to_string(),
            message: "time does not exist in the selected timezone",
        };
        match self {
            TargetInput::TimeOfDay(time) => {
                let today = zone.to_local_naive(now).date().and_time(time);
                let target = zone.from_local_naive(&today).ok_or_else(|| missing(today))?;
                if target > now {
                    return Ok(target);
                }
                let tomorrow = today
                    .checked_add_days(Days::new(1))
                    .ok_or_else(|| missing(today))?;
                zone.from_local_naive(&tomorrow).ok_or_else(|| missing(tomorrow))
            }
            TargetInput::DateTime(naive) => {
                zone.from_local_naive(&naive).ok_or_else(|| missing(naive))
            }
        }
    }
}

/// Countdown to a target instant.
///
/// Remaining time is derived from `target - now` on every read, so the
/// state only stores the target and whether the "reached" event has fired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountdownState {
    target: Option<DateTime<Utc>>,
    reached: bool,
}

impl CountdownState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<DateTime<Utc>> {
        self.target
    }

    pub fn set_target(&mut self, target: DateTime<Utc>) {
        self.target = Some(target);
        self.reached = false;
    }

    pub fn clear(&mut self) {
        self.target = None;
        self.reached = false;
    }

    /// Whole seconds left, floored; zero when unset or already passed.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u64 {
        match self.target {
            Some(target) if target > now => {
                u64::try_from((target - now).num_seconds()).unwrap_or(0)
            }
            _ => 0,
        }
    }

    pub fn is_reached(&self) -> bool {
        self.reached
    }

    /// Returns `true` exactly once: on the first tick at or after the target.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        match self.target {
            Some(target) if !self.reached && now >= target => {
                self.reached = true;
                true
            }
            _ => false,
        }
    }

    pub fn display(&self, now: DateTime<Utc>) -> String {
        format_countdown(self.remaining_secs(now))
    }
}
