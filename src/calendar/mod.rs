pub mod date_key;
pub mod entry;
pub mod grid;
pub mod month_table;
pub mod mood;
pub mod orchestrator;
pub mod presentation;
pub mod view;

pub use date_key::DateKey;
pub use entry::DayEntry;
pub use grid::MAX_WEEKS;
pub use month_table::WEEKDAY_LABELS;
pub use mood::Mood;
pub use orchestrator::{DayCell, MonthView, MoodCalendar};
pub use presentation::{fill_color, tooltip_content};
pub use view::{DefaultView, ViewState};
