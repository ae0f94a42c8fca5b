//! Selector state held by the citation form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Citation format selected in the form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationFormat {
    /// `{author} ({date}). {title}. Recuperado de {url}`
    #[default]
    Apa,
    /// `{author}. {title}. {date}; Disponible en: {url}`
    Vancouver,
}

impl CitationFormat {
    /// Every selectable format, in display order
    pub const ALL: [CitationFormat; 2] = [CitationFormat::Apa, CitationFormat::Vancouver];

    /// Returns the display name of the format
    pub fn name(&self) -> &'static str {
        match self {
            CitationFormat::Apa => "APA",
            CitationFormat::Vancouver => "Vancouver",
        }
    }
}

impl fmt::Display for CitationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a format name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown citation format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for CitationFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apa" | "a" => Ok(CitationFormat::Apa),
            "vancouver" | "v" => Ok(CitationFormat::Vancouver),
            _ => Err(UnknownFormat(s.trim().to_string())),
        }
    }
}

/// Background theme of the form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Background colour as an RGB triple
    pub fn background(self) -> (u8, u8, u8) {
        match self {
            Theme::Light => (0xD3, 0xD3, 0xD3),
            Theme::Dark => (0x33, 0x33, 0x33),
        }
    }

    /// Foreground colour readable on [`Theme::background`]
    pub fn foreground(self) -> (u8, u8, u8) {
        match self {
            Theme::Light => (0x10, 0x10, 0x10),
            Theme::Dark => (0xF0, 0xF0, 0xF0),
        }
    }

    /// Background colour in `#RRGGBB` notation
    pub fn background_hex(self) -> String {
        let (r, g, b) = self.background();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}
