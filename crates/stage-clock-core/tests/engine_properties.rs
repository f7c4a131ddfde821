use std::cell::Cell;
use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use stage_clock_core::format::format_duration;
use stage_clock_core::{
    ClockEngine, ClockError, ClockSettings, Command, DisplayZone, FullscreenController, Key,
    Mode, Presenter, TickSource, TimeSample, TimeSource,
};

/// A hand-cranked clock.
struct ManualTime {
    now: Cell<TimeSample>,
}

impl ManualTime {
    fn new() -> Self {
        Self {
            now: Cell::new(TimeSample::new(
                Utc.with_ymd_and_hms(2026, 10, 18, 19, 30, 0).unwrap(),
                Instant::now(),
            )),
        }
    }

    fn advance(&self, secs: u64) {
        self.now.set(self.now.get().advanced(Duration::from_secs(secs)));
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> TimeSample {
        self.now.get()
    }
}

fn utc() -> DisplayZone {
    DisplayZone::Named(Tz::UTC)
}

fn primary(engine: &ClockEngine) -> String {
    engine.display(&ClockSettings::default(), &utc()).primary
}

// ── Duration formatting ─────────────────────────────────────────────

#[test]
fn duration_format_contract() {
    assert_eq!(format_duration(0), "00:00");
    assert_eq!(format_duration(59), "00:59");
    assert_eq!(format_duration(60), "01:00");
    assert_eq!(format_duration(3661), "01:01:01");
}

// ── Timer ───────────────────────────────────────────────────────────

#[test]
fn timer_runs_out_after_five_ticks() {
    let time = ManualTime::new();
    let mut engine = ClockEngine::new(Mode::Timer, 5, time.now());
    engine.apply(Command::TimerStart, time.now());

    for _ in 0..5 {
        time.advance(1);
        engine.tick(TickSource::Timer, time.now());
    }
    assert_eq!(engine.timer().remaining(), 0);
    assert!(!engine.timer().is_running());
    assert!(!engine.wanted_tickers().contains(&TickSource::Timer));

    for _ in 0..3 {
        time.advance(1);
        engine.tick(TickSource::Timer, time.now());
    }
    assert_eq!(engine.timer().remaining(), 0);
    assert_eq!(primary(&engine), "00:00");
}

#[test]
fn timer_minute_steps() {
    let time = ManualTime::new();
    let mut engine = ClockEngine::new(Mode::Timer, 30, time.now());
    engine.apply(Command::TimerAdjust(60), time.now());
    assert_eq!(engine.timer().remaining(), 90);

    let mut engine = ClockEngine::new(Mode::Timer, 30, time.now());
    engine.apply(Command::TimerAdjust(-60), time.now());
    assert_eq!(engine.timer().remaining(), 0);
}

// ── Stopwatch ───────────────────────────────────────────────────────

#[test]
fn stopwatch_pause_and_reset() {
    let time = ManualTime::new();
    let mut engine = ClockEngine::new(Mode::Stopwatch, 300, time.now());
    engine.apply(Command::StopwatchStart, time.now());
    for _ in 0..3 {
        time.advance(1);
        engine.tick(TickSource::Stopwatch, time.now());
    }
    engine.apply(Command::StopwatchPause, time.now());
    assert_eq!(engine.stopwatch().elapsed_secs(), 3);
    assert_eq!(primary(&engine), "00:03");

    engine.apply(Command::StopwatchReset, time.now());
    assert_eq!(engine.stopwatch().elapsed_secs(), 0);
    assert!(!engine.stopwatch().is_running());
}

// ── Countdown ───────────────────────────────────────────────────────

#[test]
fn countdown_reaches_zero_and_stays() {
    let time = ManualTime::new();
    let mut engine = ClockEngine::new(Mode::Countdown, 300, time.now());
    let target = time.now().wall + chrono::Duration::seconds(90);
    engine.apply(Command::CountdownSetTarget(target), time.now());
    assert_eq!(primary(&engine), "00:01:30");

    time.advance(1);
    engine.tick(TickSource::Wall, time.now());
    assert_eq!(primary(&engine), "00:01:29");

    time.advance(89);
    engine.tick(TickSource::Wall, time.now());
    assert_eq!(primary(&engine), "00:00:00");

    for _ in 0..5 {
        time.advance(1);
        engine.tick(TickSource::Wall, time.now());
        assert_eq!(primary(&engine), "00:00:00");
    }
}

#[test]
fn countdown_time_of_day_rolls_over() {
    let time = ManualTime::new();
    let mut engine = ClockEngine::new(Mode::Countdown, 300, time.now());
    // 19:30 now; 19:00 already passed today.
    engine.set_countdown_input("19:00", &utc(), time.now()).unwrap();
    assert_eq!(primary(&engine), "23:30:00");
}

// ── Fullscreen ──────────────────────────────────────────────────────

#[derive(Default)]
struct ScriptedPresenter {
    fullscreen: bool,
    refuse: bool,
    enter_requests: usize,
}

impl Presenter for ScriptedPresenter {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn enter_fullscreen(&mut self) -> Result<(), ClockError> {
        self.enter_requests += 1;
        if self.refuse {
            Err(ClockError::Presentation("denied by platform".to_string()))
        } else {
            self.fullscreen = true;
            Ok(())
        }
    }

    fn exit_fullscreen(&mut self) -> Result<(), ClockError> {
        self.fullscreen = false;
        Ok(())
    }
}

#[test]
fn fullscreen_toggle_and_escape() {
    let mut fs = FullscreenController::new(ScriptedPresenter::default());
    fs.handle_key(Key::Char('f'));
    assert!(fs.is_fullscreen());
    assert_eq!(fs.presenter().enter_requests, 1);

    fs.handle_key(Key::Escape);
    assert!(!fs.is_fullscreen());
}

#[test]
fn fullscreen_refusal_is_swallowed() {
    let mut fs = FullscreenController::new(ScriptedPresenter {
        refuse: true,
        ..Default::default()
    });
    fs.handle_key(Key::Char('f'));
    assert!(!fs.is_fullscreen());
    assert_eq!(fs.presenter().enter_requests, 1);
}

// ── Mode independence ───────────────────────────────────────────────

#[test]
fn switching_modes_keeps_other_counters() {
    let time = ManualTime::new();
    let mut engine = ClockEngine::new(Mode::Timer, 120, time.now());
    engine.apply(Command::TimerStart, time.now());
    time.advance(1);
    engine.tick(TickSource::Timer, time.now());
    engine.apply(Command::TimerPause, time.now());
    let before = engine.timer().remaining();

    engine.apply(Command::SelectMode(Mode::Stopwatch), time.now());
    engine.apply(Command::StopwatchStart, time.now());
    for _ in 0..4 {
        time.advance(1);
        engine.tick(TickSource::Stopwatch, time.now());
    }

    engine.apply(Command::SelectMode(Mode::Timer), time.now());
    assert_eq!(engine.timer().remaining(), before);
    assert_eq!(primary(&engine), "01:59");
    // The stopwatch kept running in the background.
    assert!(engine.stopwatch().is_running());
    assert_eq!(engine.stopwatch().elapsed_secs(), 4);
}

#[test]
fn running_timer_keeps_counting_while_hidden() {
    let time = ManualTime::new();
    let mut engine = ClockEngine::new(Mode::Timer, 10, time.now());
    engine.apply(Command::TimerStart, time.now());
    engine.apply(Command::SelectMode(Mode::Clock), time.now());
    for _ in 0..3 {
        time.advance(1);
        engine.tick(TickSource::Timer, time.now());
    }
    assert_eq!(engine.timer().remaining(), 7);
}
