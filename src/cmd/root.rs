use crate::calendar::{MoodCalendar, ViewState};
use crate::data::{AppSettings, DayEntryStore, DirStorage, Preferences, TodoList};
use crate::ui::dashboard::{App, run_app};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;
use std::path::Path;
use tracing::info;

pub fn run(data_dir: &Path, settings: &AppSettings) -> Result<()> {
    let storage = DirStorage::new(data_dir);
    let store = DayEntryStore::open(Box::new(storage.clone()), settings.prune_empty_entries);
    let calendar = MoodCalendar::new(store, ViewState::new(settings.default_view));
    let prefs = Preferences::open(Box::new(storage.clone()));
    let todos = TodoList::open(Box::new(storage));

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let mut app = App::new(calendar, prefs, todos, today, data_dir.to_path_buf());
    info!(dir = %data_dir.display(), "dashboard started");

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    info!("dashboard closed");

    // Every change was written through as it happened; nothing to flush here.
    result
}
