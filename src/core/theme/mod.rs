//! Theme state
//!
//! The active theme picks a background image and a tint pair. The
//! mapping is a static table; nothing here is persisted.

use crate::core::error::LauncherError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Blue,
    Moon,
    Meadow,
}

/// RGBA colour with straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

const fn tint(r: u8, g: u8, b: u8, a: u8) -> Tint {
    Tint { r, g, b, a }
}

/// What presentation needs to draw a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyle {
    /// Background image, relative to the launcher's resource directory
    pub background: &'static str,
    pub tint: Tint,
    pub hover: Tint,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Blue, Theme::Moon, Theme::Meadow];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Moon => "moon",
            Self::Meadow => "meadow",
        }
    }

    pub fn style(&self) -> ThemeStyle {
        match self {
            Self::Blue => ThemeStyle {
                background: "background.jpg",
                tint: tint(0, 50, 150, 102),
                hover: tint(0, 150, 255, 128),
            },
            Self::Moon => ThemeStyle {
                background: "moon.jpg",
                tint: tint(30, 30, 30, 204),
                hover: tint(80, 80, 80, 204),
            },
            Self::Meadow => ThemeStyle {
                background: "meadow.jpg",
                tint: tint(50, 100, 50, 128),
                hover: tint(100, 200, 100, 128),
            },
        }
    }

    /// The next theme in order, wrapping around
    pub fn next(&self) -> Theme {
        let i = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl FromStr for Theme {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| LauncherError::UnknownTheme(s.to_string()))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
