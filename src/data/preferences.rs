use crate::data::persistence::{Persistable, Storage};
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSettings {
    pub show_tasks: bool,
    pub show_calendar: bool,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        WidgetSettings {
            show_tasks: true,
            show_calendar: true,
        }
    }
}

impl Persistable for WidgetSettings {
    fn key() -> &'static str {
        "moodbits-widget-settings"
    }
}

/// Whether day-of-month numerals are drawn on calendar cells.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct ShowDayNumbers(pub bool);

impl Default for ShowDayNumbers {
    fn default() -> Self {
        ShowDayNumbers(true)
    }
}

impl Persistable for ShowDayNumbers {
    fn key() -> &'static str {
        "mood-calendar-show-numbers"
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Username(pub String);

impl Default for Username {
    fn default() -> Self {
        Username("you".to_string())
    }
}

impl Persistable for Username {
    fn key() -> &'static str {
        "moodbits-username"
    }
}

/// The small records behind the settings screen, written through on change.
pub struct Preferences {
    pub widgets: WidgetSettings,
    pub show_numbers: bool,
    pub username: String,
    storage: Box<dyn Storage>,
}

impl Preferences {
    pub fn open(storage: Box<dyn Storage>) -> Self {
        Preferences {
            widgets: WidgetSettings::load_or_default(storage.as_ref()),
            show_numbers: ShowDayNumbers::load_or_default(storage.as_ref()).0,
            username: Username::load_or_default(storage.as_ref()).0,
            storage,
        }
    }

    pub fn toggle_tasks(&mut self) -> Result<()> {
        self.widgets.show_tasks = !self.widgets.show_tasks;
        self.widgets.save(self.storage.as_mut())
    }

    pub fn toggle_calendar(&mut self) -> Result<()> {
        self.widgets.show_calendar = !self.widgets.show_calendar;
        self.widgets.save(self.storage.as_mut())
    }

    pub fn toggle_show_numbers(&mut self) -> Result<()> {
        self.show_numbers = !self.show_numbers;
        ShowDayNumbers(self.show_numbers).save(self.storage.as_mut())
    }

    pub fn set_username(&mut self, name: &str) -> Result<()> {
        self.username = name.to_string();
        Username(self.username.clone()).save(self.storage.as_mut())
    }
}
