//! The clock engine: the mode state machine and its per-mode counters.
//!
//! All four counters live side by side and keep running independently of
//! which mode is on screen. The engine does not own any timers; it says
//! which [`TickSource`]s it needs via [`ClockEngine::wanted_tickers`] and
//! the runtime delivers ticks through [`ClockEngine::tick`].

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::countdown::{CountdownState, TargetInput};
use crate::error::Result;
use crate::format::{format_date, format_duration, format_wall_time, parse_duration};
use crate::mode::Mode;
use crate::settings::ClockSettings;
use crate::stopwatch::StopwatchState;
use crate::system::TimeSample;
use crate::timer::{TimerState, ADJUST_STEP_SECONDS};
use crate::timezone::DisplayZone;

/// A periodic tick producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSource {
    /// Samples the wall clock for the clock face and the countdown.
    Wall,
    /// Decrements the timer by one second.
    Timer,
    /// Recomputes stopwatch elapsed time.
    Stopwatch,
}

impl TickSource {
    pub const ALL: [TickSource; 3] = [TickSource::Wall, TickSource::Timer, TickSource::Stopwatch];

    /// Default firing period. The timer period is fixed at one second
    /// because each timer tick removes exactly one second.
    pub fn default_period(self) -> Duration {
        match self {
            TickSource::Wall | TickSource::Timer => Duration::from_secs(1),
            TickSource::Stopwatch => Duration::from_millis(100),
        }
    }
}

/// A user action on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectMode(Mode),
    NextMode,
    PreviousMode,
    TimerStart,
    TimerPause,
    TimerToggle,
    TimerReset,
    /// Add or remove seconds; see [`ADJUST_STEP_SECONDS`].
    TimerAdjust(i64),
    TimerSetDuration(u64),
    StopwatchStart,
    StopwatchPause,
    StopwatchToggle,
    StopwatchReset,
    CountdownSetTarget(DateTime<Utc>),
    CountdownClear,
    /// Start/pause for whichever mode is active; ignored where it means nothing.
    ToggleActive,
    /// Reset for whichever mode is active; ignored where it means nothing.
    ResetActive,
}

/// Something worth telling the user about, produced by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    TimerFinished,
    CountdownReached,
}

/// A control shown under the display for the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    StartPause { running: bool },
    Reset,
    Subtract60,
    Add60,
    SetDuration,
    SetTarget,
}

/// Everything needed to draw the active mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pub mode: Mode,
    /// The large time string.
    pub primary: String,
    /// Long-form date, clock mode only.
    pub date: Option<String>,
    pub running: bool,
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone)]
pub struct ClockEngine {
    mode: Mode,
    last_sample: TimeSample,
    timer: TimerState,
    stopwatch: StopwatchState,
    countdown: CountdownState,
}

impl ClockEngine {
    pub fn new(mode: Mode, timer_seconds: u64, now: TimeSample) -> Self {
        Self {
            mode,
            last_sample: now,
            timer: TimerState::new(timer_seconds),
            stopwatch: StopwatchState::new(),
            countdown: CountdownState::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn stopwatch(&self) -> &StopwatchState {
        &self.stopwatch
    }

    pub fn countdown(&self) -> &CountdownState {
        &self.countdown
    }

    /// The most recent wall-clock sample.
    pub fn wall_time(&self) -> DateTime<Utc> {
        self.last_sample.wall
    }

    pub fn select_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            debug!(from = %self.mode, to = %mode, "mode switch");
            self.mode = mode;
        }
    }

    pub fn apply(&mut self, command: Command, now: TimeSample) {
        match command {
            Command::SelectMode(mode) => self.select_mode(mode),
            Command::NextMode => self.select_mode(self.mode.next()),
            Command::PreviousMode => self.select_mode(self.mode.previous()),
            Command::TimerStart => {
                self.timer.start();
            }
            Command::TimerPause => self.timer.pause(),
            Command::TimerToggle => {
                self.timer.toggle();
            }
            Command::TimerReset => self.timer.reset(),
            Command::TimerAdjust(delta) => {
                self.timer.adjust(delta);
            }
            Command::TimerSetDuration(seconds) => self.timer.set_duration(seconds),
            Command::StopwatchStart => self.stopwatch.start(now.mono),
            Command::StopwatchPause => self.stopwatch.pause(now.mono),
            Command::StopwatchToggle => {
                self.stopwatch.toggle(now.mono);
            }
            Command::StopwatchReset => self.stopwatch.reset(),
            Command::CountdownSetTarget(target) => {
                // Refresh "now" so the display is right before the next tick.
                self.last_sample = now;
                self.countdown.set_target(target);
                debug!(%target, "countdown target set");
            }
            Command::CountdownClear => self.countdown.clear(),
            Command::ToggleActive => match self.mode {
                Mode::Timer => self.apply(Command::TimerToggle, now),
                Mode::Stopwatch => self.apply(Command::StopwatchToggle, now),
                Mode::Clock | Mode::Countdown => {}
            },
            Command::ResetActive => match self.mode {
                Mode::Timer => self.apply(Command::TimerReset, now),
                Mode::Stopwatch => self.apply(Command::StopwatchReset, now),
                Mode::Countdown => self.apply(Command::CountdownClear, now),
                Mode::Clock => {}
            },
        }
    }

    /// Add one adjustment step to the timer (`forward`) or remove one.
    pub fn timer_step(&mut self, forward: bool, now: TimeSample) {
        let delta = if forward { ADJUST_STEP_SECONDS } else { -ADJUST_STEP_SECONDS };
        self.apply(Command::TimerAdjust(delta), now);
    }

    /// Parse and set a countdown target typed by the user.
    ///
    /// On error nothing changes; the caller decides whether to surface it.
    pub fn set_countdown_input(
        &mut self,
        input: &str,
        zone: &DisplayZone,
        now: TimeSample,
    ) -> Result<DateTime<Utc>> {
        let target = TargetInput::parse(input)?.resolve(zone, now.wall)?;
        self.apply(Command::CountdownSetTarget(target), now);
        Ok(target)
    }

    /// Parse and set the timer duration typed by the user.
    pub fn set_timer_input(&mut self, input: &str, now: TimeSample) -> Result<u64> {
        let seconds = parse_duration(input)?;
        self.apply(Command::TimerSetDuration(seconds), now);
        Ok(seconds)
    }

    /// Apply one tick from `source`.
    pub fn tick(&mut self, source: TickSource, now: TimeSample) -> Option<EngineEvent> {
        match source {
            TickSource::Wall => {
                self.last_sample = now;
                if self.countdown.tick(now.wall) {
                    info!("countdown reached its target");
                    return Some(EngineEvent::CountdownReached);
                }
                None
            }
            TickSource::Timer => {
                if self.timer.tick() {
                    info!("timer finished");
                    return Some(EngineEvent::TimerFinished);
                }
                None
            }
            TickSource::Stopwatch => {
                self.stopwatch.tick(now.mono);
                None
            }
        }
    }

    /// Tick sources that must be scheduled right now. The wall clock always
    /// runs; the timer and stopwatch only while they are running.
    pub fn wanted_tickers(&self) -> Vec<TickSource> {
        let mut wanted = vec![TickSource::Wall];
        if self.timer.is_running() {
            wanted.push(TickSource::Timer);
        }
        if self.stopwatch.is_running() {
            wanted.push(TickSource::Stopwatch);
        }
        wanted
    }

    pub fn display(&self, settings: &ClockSettings, zone: &DisplayZone) -> Display {
        match self.mode {
            Mode::Clock => {
                let local = zone.to_local_naive(self.last_sample.wall);
                Display {
                    mode: Mode::Clock,
                    primary: format_wall_time(&local, settings.is_24_hour),
                    date: Some(format_date(&local)),
                    running: true,
                    controls: Vec::new(),
                }
            }
            Mode::Timer => {
                let running = self.timer.is_running();
                Display {
                    mode: Mode::Timer,
                    primary: format_duration(self.timer.remaining()),
                    date: None,
                    running,
                    controls: vec![
                        Control::StartPause { running },
                        Control::Reset,
                        Control::Subtract60,
                        Control::Add60,
                        Control::SetDuration,
                    ],
                }
            }
            Mode::Countdown => Display {
                mode: Mode::Countdown,
                primary: self.countdown.display(self.last_sample.wall),
                date: None,
                running: self.countdown.remaining_secs(self.last_sample.wall) > 0,
                controls: vec![Control::SetTarget, Control::Reset],
            },
            Mode::Stopwatch => {
                let running = self.stopwatch.is_running();
                Display {
                    mode: Mode::Stopwatch,
                    primary: format_duration(self.stopwatch.elapsed_secs()),
                    date: None,
                    running,
                    controls: vec![Control::StartPause { running }, Control::Reset],
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Tz;
    use std::time::Instant;

    fn start() -> TimeSample {
        TimeSample::new(
            Utc.with_ymd_and_hms(2026, 10, 18, 14, 5, 9).unwrap(),
            Instant::now(),
        )
    }

    fn utc() -> DisplayZone {
        DisplayZone::Named(Tz::UTC)
    }

    #[test]
    fn clock_display_follows_settings() {
        let engine = ClockEngine::new(Mode::Clock, 300, start());
        let mut settings = ClockSettings::default();
        let display = engine.display(&settings, &utc());
        assert_eq!(display.primary, "14:05:09");
        assert_eq!(display.date.as_deref(), Some("Sunday, October 18, 2026"));
        assert!(display.controls.is_empty());

        settings.is_24_hour = false;
        assert_eq!(engine.display(&settings, &utc()).primary, "02:05:09 PM");
    }

    #[test]
    fn wall_tick_updates_clock_face() {
        let now = start();
        let mut engine = ClockEngine::new(Mode::Clock, 300, now);
        engine.tick(TickSource::Wall, now.advanced(Duration::from_secs(1)));
        let display = engine.display(&ClockSettings::default(), &utc());
        assert_eq!(display.primary, "14:05:10");
    }

    #[test]
    fn wanted_tickers_follow_running_flags() {
        let now = start();
        let mut engine = ClockEngine::new(Mode::Timer, 3, now);
        assert_eq!(engine.wanted_tickers(), [TickSource::Wall]);

        engine.apply(Command::TimerStart, now);
        engine.apply(Command::StopwatchStart, now);
        assert_eq!(
            engine.wanted_tickers(),
            [TickSource::Wall, TickSource::Timer, TickSource::Stopwatch]
        );

        for _ in 0..3 {
            engine.tick(TickSource::Timer, now);
        }
        assert_eq!(engine.wanted_tickers(), [TickSource::Wall, TickSource::Stopwatch]);

        engine.apply(Command::StopwatchReset, now);
        assert_eq!(engine.wanted_tickers(), [TickSource::Wall]);
    }

    #[test]
    fn timer_finish_is_reported_once() {
        let now = start();
        let mut engine = ClockEngine::new(Mode::Timer, 2, now);
        engine.apply(Command::TimerStart, now);
        assert_eq!(engine.tick(TickSource::Timer, now), None);
        assert_eq!(engine.tick(TickSource::Timer, now), Some(EngineEvent::TimerFinished));
        assert_eq!(engine.tick(TickSource::Timer, now), None);
    }

    #[test]
    fn toggle_and_reset_follow_active_mode() {
        let now = start();
        let mut engine = ClockEngine::new(Mode::Clock, 60, now);
        engine.apply(Command::ToggleActive, now);
        assert!(!engine.timer().is_running());
        assert!(!engine.stopwatch().is_running());

        engine.select_mode(Mode::Stopwatch);
        engine.apply(Command::ToggleActive, now);
        assert!(engine.stopwatch().is_running());
        assert!(!engine.timer().is_running());

        engine.select_mode(Mode::Timer);
        engine.apply(Command::ToggleActive, now);
        engine.tick(TickSource::Timer, now);
        engine.apply(Command::ResetActive, now);
        assert_eq!(engine.timer().remaining(), 60);
        // Resetting the timer leaves the stopwatch alone.
        assert!(engine.stopwatch().is_running());
    }

    #[test]
    fn timer_controls_show_state() {
        let now = start();
        let mut engine = ClockEngine::new(Mode::Timer, 90, now);
        let display = engine.display(&ClockSettings::default(), &utc());
        assert_eq!(display.primary, "01:30");
        assert_eq!(display.controls[0], Control::StartPause { running: false });

        engine.apply(Command::TimerToggle, now);
        let display = engine.display(&ClockSettings::default(), &utc());
        assert_eq!(display.controls[0], Control::StartPause { running: true });
    }

    #[test]
    fn timer_step_adjusts_by_a_minute() {
        let now = start();
        let mut engine = ClockEngine::new(Mode::Timer, 30, now);
        engine.timer_step(true, now);
        assert_eq!(engine.timer().remaining(), 90);
        engine.timer_step(false, now);
        engine.timer_step(false, now);
        assert_eq!(engine.timer().remaining(), 0);
    }

    #[test]
    fn countdown_input_sets_target() {
        let now = start();
        let mut engine = ClockEngine::new(Mode::Countdown, 300, now);
        let target = engine.set_countdown_input("15:00", &utc(), now).unwrap();
        assert_eq!(target, Utc.with_ymd_and_hms(2026, 10, 18, 15, 0, 0).unwrap());
        let display = engine.display(&ClockSettings::default(), &utc());
        assert_eq!(display.primary, "00:54:51");
    }

    #[test]
    fn bad_countdown_input_changes_nothing() {
        let now = start();
        let mut engine = ClockEngine::new(Mode::Countdown, 300, now);
        engine.set_countdown_input("15:00", &utc(), now).unwrap();
        let before = engine.countdown().target();
        assert!(engine.set_countdown_input("half past", &utc(), now).is_err());
        assert_eq!(engine.countdown().target(), before);
    }

    #[test]
    fn timer_input_sets_duration() {
        let now = start();
        let mut engine = ClockEngine::new(Mode::Timer, 300, now);
        assert_eq!(engine.set_timer_input("1h30m", now).unwrap(), 5400);
        assert_eq!(engine.timer().configured(), 5400);
        assert!(engine.set_timer_input("soon", now).is_err());
        assert_eq!(engine.timer().configured(), 5400);
    }

    #[test]
    fn countdown_reached_from_wall_ticks() {
        let now = start();
        let mut engine = ClockEngine::new(Mode::Countdown, 300, now);
        let target = now.wall + chrono::Duration::seconds(2);
        engine.apply(Command::CountdownSetTarget(target), now);

        let one = now.advanced(Duration::from_secs(1));
        let two = now.advanced(Duration::from_secs(2));
        assert_eq!(engine.tick(TickSource::Wall, one), None);
        assert_eq!(engine.tick(TickSource::Wall, two), Some(EngineEvent::CountdownReached));
        assert_eq!(engine.tick(TickSource::Wall, two), None);
    }

    #[test]
    fn mode_cycling() {
        let now = start();
        let mut engine = ClockEngine::new(Mode::Clock, 300, now);
        engine.apply(Command::NextMode, now);
        assert_eq!(engine.mode(), Mode::Timer);
        engine.apply(Command::PreviousMode, now);
        engine.apply(Command::PreviousMode, now);
        assert_eq!(engine.mode(), Mode::Stopwatch);
    }
}
