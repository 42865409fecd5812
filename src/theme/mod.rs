//! theming stuff for the site
//!
//! the theme is two independent choices: a [`ThemeMode`] (light/dark) and a
//! [`Palette`] layered on top of it. both are persisted in durable client
//! storage and reflected onto the document root by the [`controller`].
pub mod colors;
pub mod controller;
pub mod document;
pub mod favicon;
pub mod prehydrate;
pub mod presets;
pub mod registry;
pub mod storage;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

use {
    crate::theme::colors::ModeColors,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// a palette definition
pub trait PaletteDef {
    /// the id of the palette this definition belongs to
    fn id() -> Palette;
    /// the display name of the palette
    fn name() -> &'static str;
    /// the colors of the palette, per mode
    fn colors() -> ModeColors;
}

/// the visual mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// light variant
    Light,
    /// dark variant
    #[default]
    Dark,
}

impl ThemeMode {
    /// the token stored in durable storage and on the document root
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// parse a stored token, only exact matches are accepted
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// resolve a stored value, falling back to the default when it's missing or unknown
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }

    /// the opposite mode
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// whether this is the dark mode
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// a named accent palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Palette {
    /// the neutral palette
    #[default]
    #[serde(rename = "palette-default")]
    Default,
    /// first variant
    #[serde(rename = "palette-1")]
    One,
    /// second variant
    #[serde(rename = "palette-2")]
    Two,
    /// third variant
    #[serde(rename = "palette-3")]
    Three,
    /// fourth variant
    #[serde(rename = "palette-4")]
    Four,
    /// fifth variant
    #[serde(rename = "palette-5")]
    Five,
}

impl Palette {
    /// every recognized palette, in display order
    pub const ALL: [Palette; 6] = [
        Self::Default,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
    ];

    /// the token stored in durable storage and on the document root
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "palette-default",
            Self::One => "palette-1",
            Self::Two => "palette-2",
            Self::Three => "palette-3",
            Self::Four => "palette-4",
            Self::Five => "palette-5",
        }
    }

    /// parse a stored token against the whitelist
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == raw)
    }

    /// resolve a stored value, falling back to the default when it's missing or unknown
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|p| p.as_str()).collect();
            format!("unknown palette `{}`, expected one of: {}", s, known.join(", "))
        })
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown mode `{}`, expected light or dark", s))
    }
}

/// the current theme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeState {
    /// light or dark
    pub mode: ThemeMode,
    /// the accent palette
    pub palette: Palette,
}

impl ThemeState {
    /// build a state from raw stored values, discarding anything unrecognized
    pub fn from_stored(mode: Option<&str>, palette: Option<&str>) -> Self {
        Self {
            mode: ThemeMode::from_stored(mode),
            palette: Palette::from_stored(palette),
        }
    }
}
