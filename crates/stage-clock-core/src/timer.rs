/// Configured duration of a fresh timer (5 minutes).
pub const DEFAULT_TIMER_SECONDS: u64 = 300;

/// Step used by the `+` / `-` timer controls.
pub const ADJUST_STEP_SECONDS: i64 = 60;

/// Countdown timer: a whole-second counter that decrements once per tick
/// while running and stops itself at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    configured: u64,
    remaining: u64,
    running: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_TIMER_SECONDS)
    }
}

impl TimerState {
    pub fn new(seconds: u64) -> Self {
        Self {
            configured: seconds,
            remaining: seconds,
            running: false,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// The duration [`TimerState::reset`] restores.
    pub fn configured(&self) -> u64 {
        self.configured
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start counting down. Does nothing when no time is left; returns
    /// whether the timer is running afterwards.
    pub fn start(&mut self) -> bool {
        if self.remaining > 0 {
            self.running = true;
        }
        self.running
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.pause();
            false
        } else {
            self.start()
        }
    }

    /// Stop and restore the configured duration.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.configured;
    }

    /// Replace the configured duration. The timer stops and shows the new
    /// duration.
    pub fn set_duration(&mut self, seconds: u64) {
        self.configured = seconds;
        self.reset();
    }

    /// Add (or with a negative delta, remove) time. Never goes below zero.
    pub fn adjust(&mut self, delta: i64) -> u64 {
        self.remaining = if delta >= 0 {
            self.remaining.saturating_add(delta.unsigned_abs())
        } else {
            self.remaining.saturating_sub(delta.unsigned_abs())
        };
        if self.remaining == 0 {
            self.running = false;
        }
        self.remaining
    }

    /// Apply one 1-second tick. Returns `true` on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        if self.remaining <= 1 {
            self.remaining = 0;
            self.running = false;
            return true;
        }
        self.remaining -= 1;
        false
    }
}
