//! Presentation customizer: template gallery, colors, font and background.
//!
//! Every operation takes the current settings and returns a complete
//! replacement; nothing is patched in place. The caller decides when to
//! swap the new settings in.

use std::path::Path;

use tracing::debug;

use crate::error::{ClockError, Result};
use crate::settings::{BackgroundImage, ClockSettings, FontFamily, Rgb, FONT_SIZE_RANGE};

/// A named look: background, text color and typeface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub background: Rgb,
    pub text: Rgb,
    pub font: FontFamily,
}

const fn template(name: &'static str, background: u32, text: u32, font: FontFamily) -> Template {
    const fn rgb(v: u32) -> Rgb {
        Rgb::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }
    Template {
        name,
        background: rgb(background),
        text: rgb(text),
        font,
    }
}

/// The fixed template gallery.
pub const TEMPLATES: &[Template] = &[
    template("Classic Digital", 0x000000, 0x4ade80, FontFamily::Mono),
    template("Neon Blue", 0x0f172a, 0x22d3ee, FontFamily::Mono),
    template("Retro Orange", 0x7c2d12, 0xfed7aa, FontFamily::Mono),
    template("Purple Dream", 0x581c87, 0xe9d5ff, FontFamily::Serif),
    template("Ocean Breeze", 0x1e3a8a, 0xbfdbfe, FontFamily::Sans),
    template("Forest Green", 0x14532d, 0xbbf7d0, FontFamily::Mono),
    template("Sunset", 0x7f1d1d, 0xfef08a, FontFamily::Serif),
    template("Midnight", 0x111827, 0xffffff, FontFamily::Mono),
    template("Gold Rush", 0x713f12, 0xfef9c3, FontFamily::Serif),
    template("Ice Cold", 0xdbeafe, 0x1e3a8a, FontFamily::Mono),
    template("Fire Red", 0x991b1b, 0xfee2e2, FontFamily::Bold),
    template("Mint Fresh", 0x065f46, 0xd1fae5, FontFamily::Sans),
    template("Royal Purple", 0x312e81, 0xc7d2fe, FontFamily::Serif),
    template("Copper", 0x9a3412, 0xffedd5, FontFamily::Mono),
    template("Silver", 0x334155, 0xf1f5f9, FontFamily::Sans),
    template("Rose Gold", 0x831843, 0xfbcfe8, FontFamily::Serif),
    template("Electric", 0x4c1d95, 0xddd6fe, FontFamily::Mono),
    template("Matrix", 0x000000, 0x86efac, FontFamily::Mono),
    template("Pastel", 0xfce7f3, 0x9d174d, FontFamily::Sans),
    template("Terminal", 0x1f2937, 0x4ade80, FontFamily::Mono),
    template("Gradient Sunset", 0xf97316, 0xffffff, FontFamily::Bold),
    template("Gradient Ocean", 0x3b82f6, 0xffffff, FontFamily::Sans),
    template("Gradient Forest", 0x22c55e, 0xffffff, FontFamily::Serif),
    template("Gradient Space", 0xa855f7, 0xffffff, FontFamily::Mono),
];

/// Stock background images.
pub const BACKGROUND_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=1920&h=1080&fit=crop",
    "https://images.unsplash.com/photo-1419242902214-272b3f66ee7a?w=1920&h=1080&fit=crop",
    "https://images.unsplash.com/photo-1465146344425-f00d5f5c8f07?w=1920&h=1080&fit=crop",
    "https://images.unsplash.com/photo-1502134249126-9f3755a50d78?w=1920&h=1080&fit=crop",
    "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=1920&h=1080&fit=crop",
    "https://images.unsplash.com/photo-1506197603052-3cc9c3a201bd?w=1920&h=1080&fit=crop",
    "https://images.unsplash.com/photo-1518837695005-2083093ee35b?w=1920&h=1080&fit=crop",
];

/// Look up a template by name, ignoring case.
pub fn find_template(name: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

/// The customizer panel. Only tracks whether it is open; all edits are
/// pure functions of the settings passed in.
#[derive(Debug, Clone, Default)]
pub struct Customizer {
    open: bool,
}

impl Customizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn apply_template(&self, current: &ClockSettings, name: &str) -> Result<ClockSettings> {
        let template =
            find_template(name).ok_or_else(|| ClockError::UnknownTemplate(name.to_string()))?;
        debug!(template = template.name, "applying template");
        Ok(ClockSettings {
            template: template.name.to_string(),
            background_color: template.background,
            text_color: template.text,
            font_family: template.font,
            ..current.clone()
        })
    }

    /// Step through the gallery relative to the current template. Settings
    /// with a template name outside the gallery start from the first entry.
    pub fn cycle_template(&self, current: &ClockSettings, forward: bool) -> ClockSettings {
        let len = TEMPLATES.len();
        let next = match TEMPLATES.iter().position(|t| t.name == current.template) {
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
            None => 0,
        };
        let template = &TEMPLATES[next];
        ClockSettings {
            template: template.name.to_string(),
            background_color: template.background,
            text_color: template.text,
            font_family: template.font,
            ..current.clone()
        }
    }

    pub fn set_text_color(&self, current: &ClockSettings, hex: &str) -> Result<ClockSettings> {
        Ok(ClockSettings {
            text_color: Rgb::parse_hex(hex)?,
            ..current.clone()
        })
    }

    pub fn set_background_color(&self, current: &ClockSettings, hex: &str) -> Result<ClockSettings> {
        Ok(ClockSettings {
            background_color: Rgb::parse_hex(hex)?,
            ..current.clone()
        })
    }

    /// Set the font size, clamped to [`FONT_SIZE_RANGE`].
    pub fn set_font_size(&self, current: &ClockSettings, size: u16) -> ClockSettings {
        ClockSettings {
            font_size: size.clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end()),
            ..current.clone()
        }
    }

    pub fn adjust_font_size(&self, current: &ClockSettings, delta: i32) -> ClockSettings {
        let size = (i32::from(current.font_size) + delta)
            .clamp(i32::from(*FONT_SIZE_RANGE.start()), i32::from(*FONT_SIZE_RANGE.end()));
        // In range of u16 after the clamp above.
        self.set_font_size(current, size as u16)
    }

    pub fn set_font_family(&self, current: &ClockSettings, family: FontFamily) -> ClockSettings {
        ClockSettings {
            font_family: family,
            ..current.clone()
        }
    }

    pub fn next_font_family(&self, current: &ClockSettings) -> ClockSettings {
        self.set_font_family(current, current.font_family.next())
    }

    pub fn previous_font_family(&self, current: &ClockSettings) -> ClockSettings {
        self.set_font_family(current, current.font_family.previous())
    }

    pub fn toggle_24_hour(&self, current: &ClockSettings) -> ClockSettings {
        ClockSettings {
            is_24_hour: !current.is_24_hour,
            ..current.clone()
        }
    }

    /// Use a stock background image by gallery index.
    pub fn set_gallery_background(&self, current: &ClockSettings, index: usize) -> Option<ClockSettings> {
        let url = BACKGROUND_IMAGES.get(index)?;
        Some(ClockSettings {
            background_image: Some(BackgroundImage::Url((*url).to_string())),
            ..current.clone()
        })
    }

    /// Step through the stock images, with "no image" between the last and
    /// the first.
    pub fn cycle_background(&self, current: &ClockSettings, forward: bool) -> ClockSettings {
        let len = BACKGROUND_IMAGES.len();
        let position = current.background_image.as_ref().and_then(|image| match image {
            BackgroundImage::Url(url) => BACKGROUND_IMAGES.iter().position(|u| u == url),
            BackgroundImage::File(_) => None,
        });
        // Slot `len` stands for "no image".
        let slot = position.unwrap_or(len);
        let next = if forward { (slot + 1) % (len + 1) } else { (slot + len) % (len + 1) };
        match self.set_gallery_background(current, next) {
            Some(settings) => settings,
            None => self.clear_background(current),
        }
    }

    /// Use a local image file. The file must exist.
    pub fn set_file_background(&self, current: &ClockSettings, path: &Path) -> Result<ClockSettings> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(ClockError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            )));
        }
        Ok(ClockSettings {
            background_image: Some(BackgroundImage::File(path.to_path_buf())),
            ..current.clone()
        })
    }

    pub fn clear_background(&self, current: &ClockSettings) -> ClockSettings {
        ClockSettings {
            background_image: None,
            ..current.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_names_are_unique() {
        for (i, a) in TEMPLATES.iter().enumerate() {
            for b in &TEMPLATES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
        assert_eq!(TEMPLATES.len(), 24);
    }

    #[test]
    fn template_replaces_look_and_keeps_the_rest() {
        let customizer = Customizer::new();
        let current = ClockSettings {
            font_size: 80,
            is_24_hour: false,
            ..Default::default()
        };
        let next = customizer.apply_template(&current, "neon blue").unwrap();
        assert_eq!(next.template, "Neon Blue");
        assert_eq!(next.background_color, Rgb::new(0x0f, 0x17, 0x2a));
        assert_eq!(next.text_color, Rgb::new(0x22, 0xd3, 0xee));
        assert_eq!(next.font_family, FontFamily::Mono);
        assert_eq!(next.font_size, 80);
        assert!(!next.is_24_hour);
        // The input is untouched.
        assert_eq!(current.template, "Classic Digital");
    }

    #[test]
    fn unknown_template_is_rejected() {
        let customizer = Customizer::new();
        let err = customizer
            .apply_template(&ClockSettings::default(), "Vaporwave")
            .unwrap_err();
        assert!(matches!(err, ClockError::UnknownTemplate(_)));
    }

    #[test]
    fn cycle_template_wraps() {
        let customizer = Customizer::new();
        let last = customizer
            .apply_template(&ClockSettings::default(), "Gradient Space")
            .unwrap();
        assert_eq!(customizer.cycle_template(&last, true).template, "Classic Digital");
        let first = customizer.cycle_template(&last, true);
        assert_eq!(customizer.cycle_template(&first, false).template, "Gradient Space");
    }

    #[test]
    fn colors_validate() {
        let customizer = Customizer::new();
        let current = ClockSettings::default();
        let next = customizer.set_text_color(&current, "#ff0000").unwrap();
        assert_eq!(next.text_color, Rgb::new(0xff, 0, 0));
        assert!(customizer.set_background_color(&current, "blue").is_err());
    }

    #[test]
    fn font_size_is_clamped() {
        let customizer = Customizer::new();
        let current = ClockSettings::default();
        assert_eq!(customizer.set_font_size(&current, 5).font_size, 12);
        assert_eq!(customizer.set_font_size(&current, 500).font_size, 200);
        assert_eq!(customizer.adjust_font_size(&current, 8).font_size, 128);
        let small = customizer.set_font_size(&current, 14);
        assert_eq!(customizer.adjust_font_size(&small, -100).font_size, 12);
    }

    #[test]
    fn background_cycle_passes_through_none() {
        let customizer = Customizer::new();
        let none = ClockSettings::default();
        let first = customizer.cycle_background(&none, true);
        assert_eq!(
            first.background_image,
            Some(BackgroundImage::Url(BACKGROUND_IMAGES[0].to_string()))
        );
        assert_eq!(customizer.cycle_background(&first, false).background_image, None);

        let last = customizer.cycle_background(&none, false);
        assert_eq!(
            last.background_image,
            Some(BackgroundImage::Url(BACKGROUND_IMAGES[BACKGROUND_IMAGES.len() - 1].to_string()))
        );
    }

    #[test]
    fn file_background_must_exist() {
        let customizer = Customizer::new();
        let current = ClockSettings::default();
        let missing = customizer.set_file_background(&current, Path::new("/definitely/not/here.png"));
        assert!(matches!(missing, Err(ClockError::Io(_))));

        let file = tempfile::NamedTempFile::new().unwrap();
        let next = customizer.set_file_background(&current, file.path()).unwrap();
        assert_eq!(next.background_image.as_ref().and_then(|b| b.as_file()), Some(file.path()));
        assert_eq!(customizer.clear_background(&next).background_image, None);
    }

    #[test]
    fn font_family_steps_both_ways() {
        let customizer = Customizer::new();
        let current = ClockSettings::default();
        assert_eq!(customizer.next_font_family(&current).font_family, FontFamily::Sans);
        assert_eq!(customizer.previous_font_family(&current).font_family, FontFamily::Bold);
    }

    #[test]
    fn open_flag() {
        let mut customizer = Customizer::new();
        assert!(!customizer.is_open());
        customizer.open();
        assert!(customizer.is_open());
        customizer.close();
        assert!(!customizer.is_open());
    }
}
