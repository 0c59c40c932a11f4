use crate::data::app_settings::CONFIG_FILE;
use crate::data::{
    AppSettings, CalendarData, DirStorage, Persistable, ShowDayNumbers, Storage, TodoData,
    Username, WidgetSettings,
};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

pub fn run(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create dir {}", dir.display()))?;
    println!("Initializing data directory: {}", dir.display());
    for name in run_in_dir(dir)? {
        println!("✓ {name} created");
    }
    println!("Data files initialized successfully.");
    Ok(())
}

/// Writes every default record that is not already present and returns the
/// file names written. Existing records are never overwritten.
pub(crate) fn run_in_dir(dir: &Path) -> Result<Vec<String>> {
    let mut storage = DirStorage::new(dir);
    let mut written = Vec::new();

    if !dir.join(CONFIG_FILE).exists() {
        AppSettings::default().save_to(dir)?;
        written.push(CONFIG_FILE.to_string());
    }

    write_default::<CalendarData>(&mut storage, &mut written)?;
    write_default::<WidgetSettings>(&mut storage, &mut written)?;
    write_default::<ShowDayNumbers>(&mut storage, &mut written)?;
    write_default::<Username>(&mut storage, &mut written)?;
    write_default::<TodoData>(&mut storage, &mut written)?;

    info!(dir = %dir.display(), files = written.len(), "data directory initialized");
    Ok(written)
}

fn write_default<T: Persistable>(storage: &mut DirStorage, written: &mut Vec<String>) -> Result<()> {
    if storage.get(T::key())?.is_some() {
        return Ok(());
    }
    T::default().save(storage)?;
    written.push(format!("{}.json", T::key()));
    Ok(())
}
