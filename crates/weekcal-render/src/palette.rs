//! The closed set of colors an event may be painted with.

use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// RGBA color with every channel in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// Alpha shared by every palette entry, so overlapping events stay visible.
pub const EVENT_ALPHA: f64 = 0.5;

/// Named color an event can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    Red,
    Green,
    Blue,
    Yellow,
}

/// The name does not match any palette entry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown palette color {0:?}")]
pub struct UnknownPaletteColor(pub String);

impl PaletteColor {
    pub const ALL: [PaletteColor; 4] = [
        PaletteColor::Red,
        PaletteColor::Green,
        PaletteColor::Blue,
        PaletteColor::Yellow,
    ];

    /// Name used in event records.
    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::Red => "red",
            PaletteColor::Green => "green",
            PaletteColor::Blue => "blue",
            PaletteColor::Yellow => "yellow",
        }
    }

    pub fn rgba(self) -> Rgba {
        let (r, g, b) = match self {
            PaletteColor::Red => (1.0, 0.0, 0.0),
            PaletteColor::Green => (0.0, 1.0, 0.0),
            PaletteColor::Blue => (0.0, 0.0, 1.0),
            PaletteColor::Yellow => (1.0, 1.0, 0.0),
        };
        Rgba {
            r,
            g,
            b,
            a: EVENT_ALPHA,
        }
    }
}

impl FromStr for PaletteColor {
    type Err = UnknownPaletteColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteColor::ALL
            .into_iter()
            .find(|color| color.name() == s)
            .ok_or_else(|| UnknownPaletteColor(s.to_owned()))
    }
}

impl Display for PaletteColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
