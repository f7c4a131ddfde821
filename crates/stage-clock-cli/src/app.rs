//! The state container and the event loop.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context};
use crossterm::event::KeyEvent;
use stage_clock_core::{
    ClockEngine, ClockError, ClockSettings, Customizer, Display, DisplayZone, FullscreenController,
    Key, Mode, Presenter, StageClockConfig, SystemTime, TickSource, TimeSource,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::event::{spawn_input_reader, AppEvent};
use crate::keymap::{
    customizer_action, is_interrupt, normal_action, prompt_action, Action, CustomizerAction,
    CustomizerField, PromptAction, PromptKind,
};
use crate::terminal::{TerminalGuard, TerminalPresenter};
use crate::ticker::{TickPeriods, Tickers};
use crate::ui;

const FONT_SIZE_STEP: i32 = 8;

/// A text prompt being typed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub buffer: String,
}

/// Where key presses go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Prompt(Prompt),
    /// The customizer panel; see [`App::customizer_cursor`] for the row.
    Customizer,
}

/// Everything the session needs to start.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub config: StageClockConfig,
    pub zone: DisplayZone,
    /// Countdown target typed on the command line.
    pub initial_target: Option<String>,
}

pub struct App<P: Presenter, T: TimeSource> {
    engine: ClockEngine,
    settings: ClockSettings,
    zone: DisplayZone,
    customizer: Customizer,
    fullscreen: FullscreenController<P>,
    input: InputMode,
    customizer_cursor: CustomizerField,
    time: T,
    bell_on_finish: bool,
    pending_bell: bool,
    should_quit: bool,
}

impl<P: Presenter, T: TimeSource> App<P, T> {
    pub fn new(options: &AppOptions, presenter: P, time: T) -> Result<Self, ClockError> {
        let config = &options.config;
        let now = time.now();
        let mut engine = ClockEngine::new(config.initial_mode, config.timer_seconds, now);
        if let Some(target) = &options.initial_target {
            let resolved = engine.set_countdown_input(target, &options.zone, now)?;
            info!(%resolved, "countdown target from command line");
        }
        Ok(Self {
            engine,
            settings: config.settings.clone(),
            zone: options.zone,
            customizer: Customizer::new(),
            fullscreen: FullscreenController::new(presenter),
            input: InputMode::Normal,
            customizer_cursor: CustomizerField::Template,
            time,
            bell_on_finish: config.bell_on_finish,
            pending_bell: false,
            should_quit: false,
        })
    }

    pub fn display(&self) -> Display {
        self.engine.display(&self.settings, &self.zone)
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn settings(&self) -> &ClockSettings {
        &self.settings
    }

    pub fn zone(&self) -> &DisplayZone {
        &self.zone
    }

    pub fn input(&self) -> &InputMode {
        &self.input
    }

    /// Whether the customizer panel is showing, including while one of its
    /// prompts is open on top of it.
    pub fn customizer_open(&self) -> bool {
        self.customizer.is_open()
    }

    pub fn customizer_cursor(&self) -> CustomizerField {
        self.customizer_cursor
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_fullscreen()
    }

    pub fn display_scale(&self) -> u16 {
        self.fullscreen.display_scale()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn wanted_tickers(&self) -> Vec<TickSource> {
        self.engine.wanted_tickers()
    }

    /// Whether a finish bell is due. Clears the request.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.pending_bell)
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick(source) => self.on_tick(source),
            AppEvent::Key(key) => self.on_key(&key),
            AppEvent::Resize(width, height) => self.fullscreen.surface_resized(width, height),
            AppEvent::InputClosed(_) => self.should_quit = true,
        }
    }

    /// Leave fullscreen before the terminal is restored.
    pub fn shutdown(&mut self) {
        self.fullscreen.exit();
    }

    fn on_tick(&mut self, source: TickSource) {
        let now = self.time.now();
        if let Some(event) = self.engine.tick(source, now) {
            debug!(?event, "engine event");
            if self.bell_on_finish {
                self.pending_bell = true;
            }
        }
    }

    fn on_key(&mut self, key: &KeyEvent) {
        if is_interrupt(key) {
            self.should_quit = true;
            return;
        }
        match &self.input {
            InputMode::Normal => {
                if let Some(action) = normal_action(key, self.engine.mode()) {
                    self.on_action(action);
                }
            }
            InputMode::Prompt(_) => {
                if let Some(action) = prompt_action(key) {
                    self.on_prompt_action(action);
                }
            }
            InputMode::Customizer => {
                if let Some(action) = customizer_action(key) {
                    self.on_customizer_action(action);
                }
            }
        }
    }

    fn on_action(&mut self, action: Action) {
        let now = self.time.now();
        match action {
            Action::Quit => self.should_quit = true,
            Action::Fullscreen(key) => {
                self.fullscreen.handle_key(key);
            }
            Action::Engine(command) => self.engine.apply(command, now),
            Action::TimerStep(forward) => self.engine.timer_step(forward, now),
            Action::OpenPrompt(kind) => self.open_prompt(kind),
            // Fullscreen hides the settings panel.
            Action::OpenCustomizer if self.is_fullscreen() => {}
            Action::OpenCustomizer => {
                self.customizer.open();
                self.input = InputMode::Customizer;
            }
        }
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        let buffer = match kind {
            PromptKind::TextColor => self.settings.text_color.to_string(),
            PromptKind::BackgroundColor => self.settings.background_color.to_string(),
            PromptKind::Timezone => self.zone.name().to_string(),
            PromptKind::BackgroundFile => self
                .settings
                .background_image
                .as_ref()
                .and_then(|image| image.as_file())
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            PromptKind::TimerDuration | PromptKind::CountdownTarget => String::new(),
        };
        self.input = InputMode::Prompt(Prompt { kind, buffer });
    }

    fn close_prompt(&mut self) {
        self.input = if self.customizer.is_open() {
            InputMode::Customizer
        } else {
            InputMode::Normal
        };
    }

    fn on_prompt_action(&mut self, action: PromptAction) {
        let InputMode::Prompt(prompt) = &mut self.input else {
            return;
        };
        match action {
            PromptAction::Insert(c) => prompt.buffer.push(c),
            PromptAction::Backspace => {
                prompt.buffer.pop();
            }
            PromptAction::Cancel => self.close_prompt(),
            PromptAction::Submit => {
                let prompt = prompt.clone();
                if let Err(e) = self.submit(&prompt) {
                    debug!(kind = ?prompt.kind, input = %prompt.buffer, "ignoring input: {e}");
                }
                self.close_prompt();
            }
        }
    }

    /// Apply a finished prompt. On error nothing changes.
    fn submit(&mut self, prompt: &Prompt) -> Result<(), ClockError> {
        let now = self.time.now();
        let input = prompt.buffer.trim();
        match prompt.kind {
            PromptKind::TimerDuration => {
                self.engine.set_timer_input(input, now)?;
            }
            PromptKind::CountdownTarget => {
                self.engine.set_countdown_input(input, &self.zone, now)?;
            }
            PromptKind::TextColor => {
                self.settings = self.customizer.set_text_color(&self.settings, input)?;
            }
            PromptKind::BackgroundColor => {
                self.settings = self.customizer.set_background_color(&self.settings, input)?;
            }
            PromptKind::BackgroundFile if input.is_empty() => {
                self.settings = self.customizer.clear_background(&self.settings);
            }
            PromptKind::BackgroundFile => {
                self.settings = self
                    .customizer
                    .set_file_background(&self.settings, Path::new(input))?;
            }
            PromptKind::Timezone => {
                self.zone = DisplayZone::parse(input)?;
                debug!(zone = self.zone.name(), "display zone changed");
            }
        }
        Ok(())
    }

    fn on_customizer_action(&mut self, action: CustomizerAction) {
        let cursor = self.customizer_cursor;
        match action {
            CustomizerAction::Close => self.close_customizer(),
            CustomizerAction::Fullscreen(key) => {
                self.fullscreen.handle_key(key);
                if key == Key::Escape || self.is_fullscreen() {
                    self.close_customizer();
                }
            }
            CustomizerAction::Up => self.customizer_cursor = cursor.previous(),
            CustomizerAction::Down => self.customizer_cursor = cursor.next(),
            CustomizerAction::Left => self.step_field(cursor, false),
            CustomizerAction::Right => self.step_field(cursor, true),
            CustomizerAction::Edit => match cursor.prompt() {
                Some(kind) => self.open_prompt(kind),
                None => self.step_field(cursor, true),
            },
        }
    }

    fn close_customizer(&mut self) {
        self.customizer.close();
        self.input = InputMode::Normal;
    }

    fn step_field(&mut self, field: CustomizerField, forward: bool) {
        let current = &self.settings;
        let customizer = &self.customizer;
        self.settings = match field {
            CustomizerField::Template => customizer.cycle_template(current, forward),
            CustomizerField::FontSize => {
                let delta = if forward { FONT_SIZE_STEP } else { -FONT_SIZE_STEP };
                customizer.adjust_font_size(current, delta)
            }
            CustomizerField::FontFamily if forward => customizer.next_font_family(current),
            CustomizerField::FontFamily => customizer.previous_font_family(current),
            CustomizerField::BackgroundImage => customizer.cycle_background(current, forward),
            CustomizerField::Clock24h => customizer.toggle_24_hour(current),
            CustomizerField::Timezone => {
                self.zone = self.zone.cycle(forward);
                return;
            }
            CustomizerField::TextColor | CustomizerField::BackgroundColor => return,
        };
    }
}

fn ring_bell() {
    let mut stdout = io::stdout();
    if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
        debug!("bell failed: {e}");
    }
}

/// Run the clock until the user quits.
pub async fn run(options: AppOptions) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut guard = TerminalGuard::enter().context("failed to prepare the terminal")?;
    let mut app = App::new(&options, TerminalPresenter::new(), SystemTime)
        .context("invalid countdown target")?;

    let periods = TickPeriods {
        stopwatch: Duration::from_millis(options.config.stopwatch_tick_ms),
        ..TickPeriods::default()
    };
    let mut tickers = Tickers::new(periods, tx.clone());
    let input = spawn_input_reader(tx);
    tickers.reconcile(&app.wanted_tickers());
    info!(mode = %app.mode(), zone = app.zone().name(), "stage clock started");

    let mut outcome = Ok(());
    loop {
        guard
            .terminal
            .draw(|frame| ui::draw(frame, &app))
            .context("failed to draw")?;

        let Some(event) = rx.recv().await else {
            break;
        };
        if let AppEvent::InputClosed(reason) = &event {
            outcome = Err(anyhow!("lost terminal input: {reason}"));
        }
        app.handle_event(event);
        if app.take_bell() {
            ring_bell();
        }
        if app.should_quit() {
            break;
        }
        tickers.reconcile(&app.wanted_tickers());
    }

    tickers.clear();
    app.shutdown();
    // Closing the queue lets the input reader notice and finish.
    drop(rx);
    if let Err(e) = input.await {
        debug!("input reader ended abnormally: {e}");
    }
    drop(guard);
    info!("stage clock stopped");
    outcome
}
