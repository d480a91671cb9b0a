//! Buffer-wide formatting: font, colors and display mode.

use std::fmt;
use std::str::FromStr;

/// Weight/slant of the whole-buffer font.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Plain,
    Bold,
    Italic,
}

impl FontStyle {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Plain => "Plain",
            Self::Bold => "Bold",
            Self::Italic => "Italic",
        }
    }
}

pub const DEFAULT_FONT_FAMILY: &str = "Monospaced";
pub const DEFAULT_FONT_SIZE: i32 = 12;

/// Font applied to the whole buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub family: String,
    pub style: FontStyle,
    pub size: i32,
}

impl Font {
    pub fn new(family: impl Into<String>, style: FontStyle, size: i32) -> Self {
        Self {
            family: family.into(),
            style,
            size,
        }
    }

    #[must_use]
    pub fn with_family(&self, family: impl Into<String>) -> Self {
        Self::new(family, self.style, self.size)
    }

    #[must_use]
    pub fn with_style(&self, style: FontStyle) -> Self {
        Self::new(self.family.clone(), style, self.size)
    }

    #[must_use]
    pub fn with_size(&self, size: i32) -> Self {
        Self::new(self.family.clone(), self.style, size)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_FAMILY, FontStyle::Plain, DEFAULT_FONT_SIZE)
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}pt", self.family, self.style.label(), self.size)
    }
}

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("black", Rgb::BLACK),
    ("white", Rgb::WHITE),
    ("red", Rgb::new(255, 0, 0)),
    ("green", Rgb::new(0, 255, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("orange", Rgb::new(255, 200, 0)),
    ("pink", Rgb::new(255, 175, 175)),
    ("gray", Rgb::new(128, 128, 128)),
    ("darkgray", Rgb::new(64, 64, 64)),
    ("lightgray", Rgb::new(192, 192, 192)),
];

/// Names accepted by [`Rgb::from_str`] besides `#rrggbb`.
pub fn color_names() -> impl Iterator<Item = &'static str> {
    NAMED_COLORS.iter().map(|(name, _)| *name)
}

/// Error returned when a color string is neither `#rrggbb` nor a known name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color: {0}")]
pub struct ParseColorError(String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() == 6 && hex.is_ascii() {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
                if let (Ok(r), Ok(g), Ok(b)) = (channel(0), channel(2), channel(4)) {
                    return Ok(Self::new(r, g, b));
                }
            }
            return Err(ParseColorError(s.to_string()));
        }
        let lower = trimmed.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, rgb)| *rgb)
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Display toggles that drive the editor colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayState {
    /// Flips on every underline toggle; never applied as a style.
    pub underline_intent: bool,
    pub dark_mode: bool,
}

impl DisplayState {
    /// Background and foreground for the current mode.
    pub const fn colors(self) -> (Rgb, Rgb) {
        if self.dark_mode {
            (Rgb::BLACK, Rgb::WHITE)
        } else {
            (Rgb::WHITE, Rgb::BLACK)
        }
    }
}
