//! Rendering. Everything here reads the app; nothing mutates it.

mod digits;
mod theme;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs};
use ratatui::Frame;
use stage_clock_core::{ClockSettings, Control, Display, Mode, Presenter, TimeSource};

use crate::app::{App, InputMode};
use crate::keymap::CustomizerField;

pub fn draw<P: Presenter, T: TimeSource>(frame: &mut Frame, app: &App<P, T>) {
    let settings = app.settings();
    let area = frame.area();
    frame.render_widget(Block::default().style(theme::base(settings)), area);

    let display = app.display();
    if app.is_fullscreen() {
        let [main, footer] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
        draw_display(frame, main, &display, settings, app.display_scale());
        let hint = Paragraph::new("Press ESC to exit fullscreen")
            .style(theme::muted(settings))
            .alignment(Alignment::Center);
        frame.render_widget(hint, footer);
    } else {
        let [tabs, main, hints, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        draw_mode_selector(frame, tabs, app.mode(), settings);
        draw_display(frame, main, &display, settings, app.display_scale());
        draw_hints(frame, hints, &display, settings);
        draw_status(frame, status, app);
    }

    if app.customizer_open() && !app.is_fullscreen() {
        draw_customizer(frame, area, app);
    }
    if let InputMode::Prompt(prompt) = app.input() {
        let popup = centered_rect(60, 7, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", prompt.kind.title()));
        let lines = vec![
            Line::from(vec![Span::raw("> "), Span::raw(prompt.buffer.as_str()), Span::raw("_")]),
            Line::from(""),
            Line::from(Span::styled(prompt.kind.hint(), Style::default().add_modifier(Modifier::DIM))),
            Line::from(Span::styled(
                "Enter to apply, Esc to cancel",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

fn draw_mode_selector(frame: &mut Frame, area: Rect, active: Mode, settings: &ClockSettings) {
    let titles = Mode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| format!("{} {}", i + 1, mode.label()));
    let selected = Mode::ALL.iter().position(|m| *m == active).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme::muted(settings))
        .highlight_style(theme::base(settings).add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::muted(settings))
                .title(" Stage Clock "),
        );
    frame.render_widget(tabs, area);
}

fn draw_display(frame: &mut Frame, area: Rect, display: &Display, settings: &ClockSettings, display_scale: u16) {
    // Room below the digits for a blank line and the date.
    let reserved = if display.date.is_some() { 2 } else { 0 };
    let preferred = theme::digit_scale(settings.font_size, display_scale);
    let fill = theme::fill_char(settings.font_family);
    let style = theme::digits(settings);

    let mut body: Vec<Line> = match digits::fit_scale(
        &display.primary,
        preferred,
        area.width,
        area.height.saturating_sub(reserved),
    )
    .and_then(|scale| digits::render(&display.primary, scale, fill))
    {
        Some(rows) => rows.into_iter().map(|row| Line::styled(row, style)).collect(),
        None => vec![Line::styled(display.primary.clone(), style)],
    };
    if !display.running && matches!(display.mode, Mode::Timer | Mode::Stopwatch) {
        body.push(Line::styled("paused", theme::muted(settings)));
    }
    if let Some(date) = &display.date {
        body.push(Line::from(""));
        body.push(Line::styled(date.clone(), theme::base(settings)));
    }

    let top = area.height.saturating_sub(body.len() as u16) / 2;
    let mut lines = vec![Line::from(""); top as usize];
    lines.extend(body);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn control_hint(control: Control) -> (&'static str, &'static str) {
    match control {
        Control::StartPause { running: true } => ("Space", "Pause"),
        Control::StartPause { running: false } => ("Space", "Start"),
        Control::Reset => ("r", "Reset"),
        Control::Subtract60 => ("-", "-1 min"),
        Control::Add60 => ("+", "+1 min"),
        Control::SetDuration => ("d", "Duration"),
        Control::SetTarget => ("Enter", "Target"),
    }
}

fn draw_hints(frame: &mut Frame, area: Rect, display: &Display, settings: &ClockSettings) {
    let key_style = theme::base(settings).add_modifier(Modifier::BOLD);
    let text_style = theme::muted(settings);
    let common = [("f", "Fullscreen"), ("p", "Customize"), ("q", "Quit")];

    let mut spans = Vec::new();
    for (key, label) in display.controls.iter().map(|c| control_hint(*c)).chain(common) {
        if !spans.is_empty() {
            spans.push(Span::styled("  ", text_style));
        }
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(format!(" {label}"), text_style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

fn draw_status<P: Presenter, T: TimeSource>(frame: &mut Frame, area: Rect, app: &App<P, T>) {
    let settings = app.settings();
    let image = settings
        .background_image
        .as_ref()
        .map_or_else(|| "none".to_string(), |image| image.short_name());
    let status = format!(
        "{}  |  {}  |  image: {}",
        settings.template,
        app.zone().label(),
        image
    );
    frame.render_widget(
        Paragraph::new(status)
            .style(theme::muted(settings))
            .alignment(Alignment::Center),
        area,
    );
}

fn field_value<P: Presenter, T: TimeSource>(field: CustomizerField, app: &App<P, T>) -> String {
    let settings = app.settings();
    match field {
        CustomizerField::Template => settings.template.clone(),
        CustomizerField::TextColor => settings.text_color.to_string(),
        CustomizerField::BackgroundColor => settings.background_color.to_string(),
        CustomizerField::FontSize => settings.font_size.to_string(),
        CustomizerField::FontFamily => settings.font_family.to_string(),
        CustomizerField::BackgroundImage => settings
            .background_image
            .as_ref()
            .map_or_else(|| "none".to_string(), |image| image.short_name()),
        CustomizerField::Clock24h => String::from(if settings.is_24_hour { "on" } else { "off" }),
        CustomizerField::Timezone => app.zone().label().to_string(),
    }
}

fn draw_customizer<P: Presenter, T: TimeSource>(frame: &mut Frame, area: Rect, app: &App<P, T>) {
    let popup = centered_rect(56, CustomizerField::ALL.len() as u16 + 5, area);
    frame.render_widget(Clear, popup);

    let settings = app.settings();
    let cursor = app.customizer_cursor();
    let mut lines: Vec<Line> = CustomizerField::ALL
        .iter()
        .map(|&field| {
            let marker = if field == cursor { "> " } else { "  " };
            let mut style = Style::default();
            if field == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let mut spans = vec![
                Span::styled(format!("{marker}{:<12}", field.label()), style),
                Span::raw(" "),
                Span::raw(field_value(field, app)),
            ];
            if matches!(field, CustomizerField::TextColor | CustomizerField::BackgroundColor) {
                let rgb = if field == CustomizerField::TextColor {
                    settings.text_color
                } else {
                    settings.background_color
                };
                spans.push(Span::raw(" "));
                spans.push(Span::styled("  ", Style::default().bg(theme::color(rgb))));
            }
            Line::from(spans)
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down select  Left/Right change  Enter edit  Esc close",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Customize ");
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let [_, row, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height), Constraint::Fill(1)])
        .areas(area);
    let [_, cell, _] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Length(width), Constraint::Fill(1)])
        .areas(row);
    cell
}
