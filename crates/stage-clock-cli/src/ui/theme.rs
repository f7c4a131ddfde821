use ratatui::style::{Color, Modifier, Style};
use stage_clock_core::{ClockSettings, FontFamily, Rgb};

/// Nominal font points per block-digit scale step.
const POINTS_PER_SCALE: u16 = 40;
const MAX_SCALE: u16 = 5;

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Page colors: text on background.
pub fn base(settings: &ClockSettings) -> Style {
    Style::default()
        .fg(color(settings.text_color))
        .bg(color(settings.background_color))
}

/// Secondary text, dimmed against the page.
pub fn muted(settings: &ClockSettings) -> Style {
    base(settings).add_modifier(Modifier::DIM)
}

/// Style for the big digits.
pub fn digits(settings: &ClockSettings) -> Style {
    match settings.font_family {
        FontFamily::Bold => base(settings).add_modifier(Modifier::BOLD),
        _ => base(settings),
    }
}

/// The cell used to paint digit strokes. Terminals have one typeface, so
/// font families map to shading instead.
pub fn fill_char(family: FontFamily) -> char {
    match family {
        FontFamily::Mono | FontFamily::Bold => '█',
        FontFamily::Sans => '▓',
        FontFamily::Serif => '▒',
    }
}

/// Preferred digit scale for a font size, before fitting to the screen.
pub fn digit_scale(font_size: u16, display_scale: u16) -> u16 {
    (font_size / POINTS_PER_SCALE).clamp(1, MAX_SCALE) * display_scale.max(1)
}
