use crate::calendar::date_key::DateKey;
use crate::calendar::entry::DayEntry;
use crate::calendar::mood::{LIGHT_TEXT, Mood};
use ratatui::style::Color;

/// Fill for a day that has notes but no mood.
pub const NOTES_ONLY_COLOR: Color = Color::Rgb(0x52, 0x52, 0x52);
/// Fill for a day with nothing recorded.
pub const EMPTY_DAY_COLOR: Color = Color::Rgb(0x32, 0x32, 0x32);
/// Numeral color on an empty day.
pub const EMPTY_DAY_TEXT: Color = Color::Rgb(0x66, 0x66, 0x66);

/// Colors for one day cell. `mood` travels with the fill so the text color
/// never has to be recovered from the fill value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPaint {
    pub mood: Option<Mood>,
    pub fill: Color,
    pub text: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub date_label: String,
    pub mood: Option<Mood>,
    pub work_note: Option<String>,
    pub journal_note: Option<String>,
}

/// Mood color wins over notes; notes win over the empty background.
pub fn fill_color(entry: &DayEntry) -> Color {
    paint(entry).fill
}

pub fn paint(entry: &DayEntry) -> CellPaint {
    match entry.mood {
        Some(mood) => CellPaint {
            mood: Some(mood),
            fill: mood.color(),
            text: mood.contrast(),
        },
        None if entry.has_notes() => CellPaint {
            mood: None,
            fill: NOTES_ONLY_COLOR,
            text: LIGHT_TEXT,
        },
        None => CellPaint {
            mood: None,
            fill: EMPTY_DAY_COLOR,
            text: EMPTY_DAY_TEXT,
        },
    }
}

/// Hover content for a day; only days with at least one note get one.
pub fn tooltip_content(entry: &DayEntry, key: &DateKey) -> Option<Tooltip> {
    if !entry.has_notes() {
        return None;
    }
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    Some(Tooltip {
        date_label: key.short_label(),
        mood: entry.mood,
        work_note: non_empty(&entry.work_note),
        journal_note: non_empty(&entry.journal_note),
    })
}

/// Label under the mood swatches in the editor.
pub fn mood_caption(mood: Option<Mood>) -> &'static str {
    mood.map(Mood::label).unwrap_or("select mood")
}
