use crate::error::MoodError;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const LIGHT_TEXT: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
pub const DARK_TEXT: Color = Color::Rgb(0x00, 0x00, 0x00);

/// The five moods a day can be marked with, in palette order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Mood {
    CoreMemory,
    GoodDay,
    Neutral,
    BadDay,
    Nightmare,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::CoreMemory,
        Mood::GoodDay,
        Mood::Neutral,
        Mood::BadDay,
        Mood::Nightmare,
    ];

    pub fn color(self) -> Color {
        match self {
            Mood::CoreMemory => Color::Rgb(0x00, 0xC0, 0xE8),
            Mood::GoodDay => Color::Rgb(0x34, 0xC7, 0x59),
            Mood::Neutral => Color::Rgb(0xFF, 0xD6, 0x0A),
            Mood::BadDay => Color::Rgb(0xFF, 0x8D, 0x28),
            Mood::Nightmare => Color::Rgb(0xFF, 0x3C, 0x30),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::CoreMemory => "Core Memory",
            Mood::GoodDay => "A Good Day",
            Mood::Neutral => "Neutral",
            Mood::BadDay => "A Bad Day",
            Mood::Nightmare => "Nightmare",
        }
    }

    /// Text color readable on top of `color()`.
    pub fn contrast(self) -> Color {
        match self {
            Mood::Neutral => DARK_TEXT,
            _ => LIGHT_TEXT,
        }
    }

    /// Storage tag, e.g. `goodDay`.
    pub fn tag(self) -> &'static str {
        match self {
            Mood::CoreMemory => "coreMemory",
            Mood::GoodDay => "goodDay",
            Mood::Neutral => "neutral",
            Mood::BadDay => "badDay",
            Mood::Nightmare => "nightmare",
        }
    }

    fn position(self) -> usize {
        Mood::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    /// Next mood in palette order; `None` starts at the first.
    pub fn cycle_next(current: Option<Mood>) -> Mood {
        match current {
            Some(m) => Mood::ALL[(m.position() + 1) % Mood::ALL.len()],
            None => Mood::ALL[0],
        }
    }

    /// Previous mood in palette order; `None` starts at the last.
    pub fn cycle_prev(current: Option<Mood>) -> Mood {
        let n = Mood::ALL.len();
        match current {
            Some(m) => Mood::ALL[(m.position() + n - 1) % n],
            None => Mood::ALL[n - 1],
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Mood {
    type Err = MoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.tag() == s)
            .ok_or_else(|| MoodError::UnknownMood(s.to_string()))
    }
}

/// `#RRGGBB` for RGB colors, the debug name otherwise.
pub fn hex(color: Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{r:02X}{g:02X}{b:02X}"),
        other => format!("{other:?}"),
    }
}
