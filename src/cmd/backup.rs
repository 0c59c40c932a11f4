use crate::data::{
    CalendarData, DirStorage, Persistable, ShowDayNumbers, Storage, TodoData, Username,
    WidgetSettings,
};
use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub(crate) type RecordCheck = fn(&Value) -> Result<(), serde_json::Error>;

fn check<T: Persistable>(value: &Value) -> Result<(), serde_json::Error> {
    serde_json::from_value::<T>(value.clone()).map(|_| ())
}

/// Records moodbits reads, with the shape check restore runs before writing.
pub(crate) fn backup_records() -> [(&'static str, RecordCheck); 5] {
    [
        (WidgetSettings::key(), check::<WidgetSettings>),
        (TodoData::key(), check::<TodoData>),
        (CalendarData::key(), check::<CalendarData>),
        (ShowDayNumbers::key(), check::<ShowDayNumbers>),
        (Username::key(), check::<Username>),
    ]
}

pub fn run(data_dir: &Path, target_dir: &str) -> Result<()> {
    if !Path::new(target_dir).exists() {
        bail!("Target directory does not exist: {}", target_dir);
    }
    let target = fs::canonicalize(target_dir)
        .with_context(|| format!("failed to resolve path: {}", target_dir))?;

    let storage = DirStorage::new(data_dir);
    let path = write_backup(&storage, &target, Local::now().date_naive())?;
    println!("Backup written to {}", path.display());
    Ok(())
}

/// Bundles every stored record into one JSON object keyed by storage key,
/// including records moodbits does not read itself. Records that are not
/// valid JSON are left out.
pub(crate) fn export_bundle(storage: &dyn Storage) -> Result<Map<String, Value>> {
    let mut bundle = Map::new();
    for key in storage.keys()? {
        let Some(raw) = storage.get(&key)? else {
            continue;
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => {
                bundle.insert(key, value);
            }
            Err(e) => warn!(key = %key, error = %e, "skipping unreadable record in backup"),
        }
    }
    Ok(bundle)
}

pub(crate) fn backup_file_name(date: NaiveDate) -> String {
    format!("moodbits-backup-{}.json", date.format("%Y-%m-%d"))
}

pub(crate) fn write_backup(storage: &dyn Storage, target: &Path, date: NaiveDate) -> Result<PathBuf> {
    let bundle = export_bundle(storage)?;
    let contents = serde_json::to_string_pretty(&bundle).context("failed to serialize backup")?;
    let path = target.join(backup_file_name(date));
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), records = bundle.len(), "backup written");
    Ok(path)
}
