//! Key bindings. Pure mappings from key events to actions; the app decides
//! what each action does.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use stage_clock_core::{Command, Key, Mode};

/// What a text prompt is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    TimerDuration,
    CountdownTarget,
    TextColor,
    BackgroundColor,
    BackgroundFile,
    Timezone,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::TimerDuration => "Timer duration",
            PromptKind::CountdownTarget => "Countdown target",
            PromptKind::TextColor => "Text color",
            PromptKind::BackgroundColor => "Background color",
            PromptKind::BackgroundFile => "Background image file",
            PromptKind::Timezone => "Timezone",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            PromptKind::TimerDuration => "e.g. 5m, 1h30m, 90, 05:00",
            PromptKind::CountdownTarget => "HH:MM (next occurrence) or YYYY-MM-DD HH:MM",
            PromptKind::TextColor | PromptKind::BackgroundColor => "#rrggbb",
            PromptKind::BackgroundFile => "path to an image file, empty to clear",
            PromptKind::Timezone => "local or an IANA name, e.g. Europe/Paris",
        }
    }
}

/// Rows of the customizer panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomizerField {
    Template,
    TextColor,
    BackgroundColor,
    FontSize,
    FontFamily,
    BackgroundImage,
    Clock24h,
    Timezone,
}

impl CustomizerField {
    pub const ALL: [CustomizerField; 8] = [
        CustomizerField::Template,
        CustomizerField::TextColor,
        CustomizerField::BackgroundColor,
        CustomizerField::FontSize,
        CustomizerField::FontFamily,
        CustomizerField::BackgroundImage,
        CustomizerField::Clock24h,
        CustomizerField::Timezone,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CustomizerField::Template => "Template",
            CustomizerField::TextColor => "Text color",
            CustomizerField::BackgroundColor => "Background",
            CustomizerField::FontSize => "Font size",
            CustomizerField::FontFamily => "Font family",
            CustomizerField::BackgroundImage => "Image",
            CustomizerField::Clock24h => "24-hour",
            CustomizerField::Timezone => "Timezone",
        }
    }

    fn index(self) -> usize {
        CustomizerField::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        CustomizerField::ALL[(self.index() + 1) % CustomizerField::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let len = CustomizerField::ALL.len();
        CustomizerField::ALL[(self.index() + len - 1) % len]
    }

    /// The prompt `Enter` opens on this row, if any.
    pub fn prompt(self) -> Option<PromptKind> {
        match self {
            CustomizerField::TextColor => Some(PromptKind::TextColor),
            CustomizerField::BackgroundColor => Some(PromptKind::BackgroundColor),
            CustomizerField::BackgroundImage => Some(PromptKind::BackgroundFile),
            CustomizerField::Timezone => Some(PromptKind::Timezone),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Fullscreen(Key),
    Engine(Command),
    /// `true` adds a minute to the timer, `false` removes one.
    TimerStep(bool),
    OpenPrompt(PromptKind),
    OpenCustomizer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomizerAction {
    Close,
    Up,
    Down,
    Left,
    Right,
    Edit,
    Fullscreen(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Insert(char),
    Backspace,
    Submit,
    Cancel,
}

pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

/// Bindings on the main screen. Timer and countdown controls only apply in
/// their own mode, matching the buttons shown.
pub fn normal_action(key: &KeyEvent, mode: Mode) -> Option<Action> {
    if is_interrupt(key) {
        return Some(Action::Quit);
    }
    let action = match key.code {
        KeyCode::Char('q' | 'Q') => Action::Quit,
        KeyCode::Char(c @ ('f' | 'F')) => Action::Fullscreen(Key::Char(c)),
        KeyCode::Esc => Action::Fullscreen(Key::Escape),
        KeyCode::Char(c @ '1'..='4') => {
            let idx = (c as usize) - ('1' as usize);
            Action::Engine(Command::SelectMode(Mode::ALL[idx]))
        }
        KeyCode::Tab => Action::Engine(Command::NextMode),
        KeyCode::BackTab => Action::Engine(Command::PreviousMode),
        KeyCode::Char(' ') => Action::Engine(Command::ToggleActive),
        KeyCode::Char('r' | 'R') => Action::Engine(Command::ResetActive),
        KeyCode::Char('+' | '=') if mode == Mode::Timer => Action::TimerStep(true),
        KeyCode::Char('-' | '_') if mode == Mode::Timer => Action::TimerStep(false),
        KeyCode::Char('d' | 'D') if mode == Mode::Timer => Action::OpenPrompt(PromptKind::TimerDuration),
        KeyCode::Enter | KeyCode::Char('t' | 'T') if mode == Mode::Countdown => {
            Action::OpenPrompt(PromptKind::CountdownTarget)
        }
        KeyCode::Char('p' | 'P') => Action::OpenCustomizer,
        _ => return None,
    };
    Some(action)
}

pub fn customizer_action(key: &KeyEvent) -> Option<CustomizerAction> {
    let action = match key.code {
        KeyCode::Char('p' | 'P' | 'q' | 'Q') => CustomizerAction::Close,
        // Escape closes the panel and also leaves fullscreen.
        KeyCode::Esc => CustomizerAction::Fullscreen(Key::Escape),
        KeyCode::Up | KeyCode::Char('k') => CustomizerAction::Up,
        KeyCode::Down | KeyCode::Char('j') => CustomizerAction::Down,
        KeyCode::Left | KeyCode::Char('h') => CustomizerAction::Left,
        KeyCode::Right | KeyCode::Char('l') => CustomizerAction::Right,
        KeyCode::Enter => CustomizerAction::Edit,
        KeyCode::Char(c @ ('f' | 'F')) => CustomizerAction::Fullscreen(Key::Char(c)),
        _ => return None,
    };
    Some(action)
}

pub fn prompt_action(key: &KeyEvent) -> Option<PromptAction> {
    let action = match key.code {
        KeyCode::Enter => PromptAction::Submit,
        KeyCode::Esc => PromptAction::Cancel,
        KeyCode::Backspace => PromptAction::Backspace,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => PromptAction::Insert(c),
        _ => return None,
    };
    Some(action)
}
