use std::time::Instant;

use chrono::{DateTime, Utc};

/// One reading of both clocks the engine needs.
///
/// `wall` drives the clock face and countdowns; `mono` drives the stopwatch,
/// which must not jump when the wall clock is adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSample {
    pub wall: DateTime<Utc>,
    pub mono: Instant,
}

impl TimeSample {
    pub fn new(wall: DateTime<Utc>, mono: Instant) -> Self {
        Self { wall, mono }
    }

    /// The same sample moved forward by `delta` on both clocks.
    pub fn advanced(self, delta: std::time::Duration) -> Self {
        let wall_delta = chrono::Duration::from_std(delta).unwrap_or(chrono::Duration::zero());
        Self {
            wall: self.wall + wall_delta,
            mono: self.mono + delta,
        }
    }
}

/// Timing platform trait: where "now" comes from.
///
/// The engine never reads the clock itself; the runtime samples a
/// `TimeSource` and passes the result in, so tests can drive time by hand.
pub trait TimeSource {
    fn now(&self) -> TimeSample;
}

/// The real system clocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> TimeSample {
        TimeSample {
            wall: Utc::now(),
            mono: Instant::now(),
        }
    }
}
