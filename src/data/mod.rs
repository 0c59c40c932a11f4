pub mod app_settings;
pub mod calendar_store;
pub mod persistence;
pub mod preferences;
pub mod todo;

pub use app_settings::AppSettings;
pub use calendar_store::{CalendarData, DayEntryStore};
pub use persistence::{DirStorage, MemoryStorage, Persistable, Storage};
pub use preferences::{Preferences, ShowDayNumbers, Username, WidgetSettings};
pub use todo::{TodoData, TodoList};
