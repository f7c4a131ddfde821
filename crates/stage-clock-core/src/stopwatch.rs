use std::time::{Duration, Instant};

/// Stopwatch measured against the monotonic clock.
///
/// Elapsed time is recomputed from a reference instant on every tick rather
/// than accumulated per tick, so a late or skipped tick never loses time.
/// Pausing folds the running segment into `banked`; resuming starts a new
/// segment, which is the same as re-anchoring the start at `now - elapsed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwatchState {
    banked: Duration,
    segment_start: Option<Instant>,
    elapsed: Duration,
}

impl StopwatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.segment_start.is_some()
    }

    /// Elapsed time as of the last tick, start, or pause.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }

    pub fn start(&mut self, now: Instant) {
        if self.segment_start.is_none() {
            self.banked = self.elapsed;
            self.segment_start = Some(now);
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if self.segment_start.is_some() {
            self.tick(now);
            self.banked = self.elapsed;
            self.segment_start = None;
        }
    }

    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_running() {
            self.pause(now);
        } else {
            self.start(now);
        }
        self.is_running()
    }

    /// Zero the elapsed time, clear the reference instant and stop.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Recompute elapsed time from the reference instant.
    pub fn tick(&mut self, now: Instant) {
        if let Some(start) = self.segment_start {
            self.elapsed = self.banked + now.saturating_duration_since(start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn counts_logical_ticks() {
        let t0 = Instant::now();
        let mut sw = StopwatchState::new();
        sw.start(t0);
        for n in 1..=3 {
            sw.tick(t0 + secs(n));
        }
        sw.pause(t0 + secs(3));
        assert_eq!(sw.elapsed_secs(), 3);
        assert!(!sw.is_running());

        sw.reset();
        assert_eq!(sw.elapsed_secs(), 0);
        assert!(!sw.is_running());
    }

    #[test]
    fn resume_continues_from_paused_value() {
        let t0 = Instant::now();
        let mut sw = StopwatchState::new();
        sw.start(t0);
        sw.pause(t0 + secs(4));

        // Time spent paused does not count.
        sw.start(t0 + secs(100));
        sw.tick(t0 + secs(102));
        assert_eq!(sw.elapsed_secs(), 6);
    }

    #[test]
    fn sub_second_precision_is_kept() {
        let t0 = Instant::now();
        let mut sw = StopwatchState::new();
        sw.start(t0);
        sw.tick(t0 + Duration::from_millis(2_900));
        assert_eq!(sw.elapsed(), Duration::from_millis(2_900));
        assert_eq!(sw.elapsed_secs(), 2);
    }

    #[test]
    fn ticks_while_stopped_are_ignored() {
        let t0 = Instant::now();
        let mut sw = StopwatchState::new();
        sw.tick(t0 + secs(10));
        assert_eq!(sw.elapsed_secs(), 0);
    }

    #[test]
    fn start_twice_keeps_first_reference() {
        let t0 = Instant::now();
        let mut sw = StopwatchState::new();
        sw.start(t0);
        sw.start(t0 + secs(5));
        sw.tick(t0 + secs(6));
        assert_eq!(sw.elapsed_secs(), 6);
    }
}
