use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ClockError;

/// Smallest and largest font size the customizer allows.
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u16> = 12..=200;

/// A 24-bit color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the `#rgb` short form. The `#` is optional.
    pub fn parse_hex(input: &str) -> Result<Self, ClockError> {
        let invalid = || ClockError::InvalidColor(input.to_string());
        let hex = input.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Rgb::new(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 0x11);
                Ok(Rgb::new(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::parse_hex(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::parse_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Typeface style for the clock digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Mono,
    Sans,
    Serif,
    Bold,
}

impl FontFamily {
    pub const ALL: [FontFamily; 4] = [
        FontFamily::Mono,
        FontFamily::Sans,
        FontFamily::Serif,
        FontFamily::Bold,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Mono => "mono",
            FontFamily::Sans => "sans",
            FontFamily::Serif => "serif",
            FontFamily::Bold => "bold",
        }
    }

    pub fn next(self) -> FontFamily {
        let idx = FontFamily::ALL.iter().position(|f| *f == self).unwrap_or(0);
        FontFamily::ALL[(idx + 1) % FontFamily::ALL.len()]
    }

    pub fn previous(self) -> FontFamily {
        let len = FontFamily::ALL.len();
        let idx = FontFamily::ALL.iter().position(|f| *f == self).unwrap_or(0);
        FontFamily::ALL[(idx + len - 1) % len]
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FontFamily {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        // Accept the `font-mono` spelling used by template galleries.
        let name = name.strip_prefix("font-").unwrap_or(&name);
        FontFamily::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| ClockError::UnknownFontFamily(s.to_string()))
    }
}

/// Background image reference: a gallery URL or a local file.
///
/// Written in config files as a plain string; strings starting with
/// `http://` or `https://` are URLs, anything else is a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundImage {
    Url(String),
    File(PathBuf),
}

impl BackgroundImage {
    pub fn from_reference(reference: &str) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            BackgroundImage::Url(reference.to_string())
        } else {
            BackgroundImage::File(PathBuf::from(reference))
        }
    }

    /// Short name for status lines: the file name, or the URL path's last
    /// segment without its query string.
    pub fn short_name(&self) -> String {
        match self {
            BackgroundImage::Url(url) => {
                let path = url.split('?').next().unwrap_or(url);
                path.rsplit('/').next().unwrap_or(path).to_string()
            }
            BackgroundImage::File(path) => path
                .file_name()
                .unwrap_or(path.as_os_str())
                .to_string_lossy()
                .into_owned(),
        }
    }

    pub fn as_file(&self) -> Option<&Path> {
        match self {
            BackgroundImage::File(path) => Some(path),
            BackgroundImage::Url(_) => None,
        }
    }
}

impl fmt::Display for BackgroundImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundImage::Url(url) => f.write_str(url),
            BackgroundImage::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Serialize for BackgroundImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BackgroundImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(BackgroundImage::from_reference(&raw))
    }
}

/// Visual presentation of the clock. Independent of any timing state.
///
/// The runtime owns exactly one `ClockSettings`; the customizer hands back a
/// complete replacement on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    pub text_color: Rgb,
    pub background_color: Rgb,
    /// Nominal size in points, within [`FONT_SIZE_RANGE`].
    pub font_size: u16,
    pub is_24_hour: bool,
    pub font_family: FontFamily,
    pub background_image: Option<BackgroundImage>,
    pub template: String,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            text_color: Rgb::WHITE,
            background_color: Rgb::new(0x1a, 0x1a, 0x1a),
            font_size: 120,
            is_24_hour: true,
            font_family: FontFamily::Mono,
            background_image: None,
            template: "Classic Digital".to_string(),
        }
    }
}

impl ClockSettings {
    /// Clamp out-of-range values (e.g. from a hand-edited config file).
    pub fn normalized(mut self) -> Self {
        self.font_size = self
            .font_size
            .clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end());
        self
    }
}
