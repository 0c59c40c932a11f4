use crate::calendar::mood::Mood;
use serde::{Deserialize, Serialize};

/// What was recorded for one day. An entry with no mood and empty notes
/// means the same thing as no entry at all.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DayEntry {
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(rename = "workLog", default)]
    pub work_note: String,
    #[serde(rename = "journal", default)]
    pub journal_note: String,
}

impl DayEntry {
    pub fn new(mood: Option<Mood>, work_note: &str, journal_note: &str) -> Self {
        DayEntry {
            mood,
            work_note: work_note.to_string(),
            journal_note: journal_note.to_string(),
        }
    }

    pub fn has_notes(&self) -> bool {
        !self.work_note.is_empty() || !self.journal_note.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.mood.is_none() && !self.has_notes()
    }
}
