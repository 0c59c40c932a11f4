use crate::calendar::DateKey;
use crate::cmd::backup::backup_records;
use crate::data::{CalendarData, DirStorage, MemoryStorage, Persistable, Storage};
use crate::error::MoodError;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub fn run(data_dir: &Path, file: &Path, dry_run: bool) -> Result<()> {
    if !file.exists() {
        bail!("Backup file does not exist: {}", file.display());
    }
    let contents =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;

    if dry_run {
        // Same validation path, but the writes land in a throwaway store.
        for key in restore_bundle(&mut MemoryStorage::new(), &contents)? {
            println!("  {key} would be replaced");
        }
        println!("Dry run: nothing was written.");
        return Ok(());
    }

    let mut storage = DirStorage::new(data_dir);
    let restored = restore_bundle(&mut storage, &contents)?;
    for key in &restored {
        println!("✓ {key} restored");
    }
    println!("Restore complete. Restart moodbits to see the restored data.");
    Ok(())
}

/// Replaces each record named in the bundle. The bundle is fully parsed and
/// every known record validated before the first write, so a bad file changes
/// nothing. Records moodbits does not read are written back unchanged.
pub(crate) fn restore_bundle(storage: &mut dyn Storage, contents: &str) -> Result<Vec<String>> {
    let bundle: Value = serde_json::from_str(contents)
        .map_err(|e| MoodError::RestoreParseFailure(format!("not valid JSON: {e}")))?;
    let Value::Object(records) = bundle else {
        return Err(MoodError::RestoreParseFailure("expected a JSON object".to_string()).into());
    };

    let known = backup_records();
    let mut accepted = Vec::new();
    for (key, value) in records {
        match known.iter().find(|(k, _)| *k == key) {
            Some((_, check)) => {
                check(&value).map_err(|e| {
                    MoodError::RestoreParseFailure(format!("record '{key}' is malformed: {e}"))
                })?;
                let value = if key == CalendarData::key() {
                    drop_invalid_days(value)
                } else {
                    value
                };
                accepted.push((key, value));
            }
            None if is_record_key(&key) => accepted.push((key, value)),
            None => warn!(key = %key, "skipping record with an unusable key"),
        }
    }

    let mut restored = Vec::new();
    for (key, value) in accepted {
        let raw = serde_json::to_string_pretty(&value)
            .with_context(|| format!("failed to serialize {key}"))?;
        storage.set(&key, &raw)?;
        restored.push(key);
    }
    info!(records = restored.len(), "backup restored");
    Ok(restored)
}

/// Keys become file names in the data directory.
fn is_record_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Days outside the calendar year could never be shown, so they are not kept.
fn drop_invalid_days(value: Value) -> Value {
    let Value::Object(days) = value else {
        return value;
    };
    let kept = days
        .into_iter()
        .filter(|(day, _)| match day.parse::<DateKey>() {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "dropping day from restored calendar");
                false
            }
        })
        .collect();
    Value::Object(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Mood;
    use crate::cmd::backup::export_bundle;
    use crate::data::{DayEntryStore, ShowDayNumbers, Username};
    use tempfile::TempDir;

    const BROWSER_EXPORT: &str = r#"{
        "moodbits-widget-settings": {"showTasks": false, "showCalendar": true},
        "moodbits-todos": [{"id": "a", "text": "stretch", "completed": true, "createdAt": 1767225600000}],
        "mood-calendar-2026-data": {"2026-3-7": {"mood": "goodDay", "workLog": "shipped feature", "journal": ""}},
        "mood-calendar-show-numbers": false,
        "vite-ui-theme": "dark"
    }"#;

    #[test]
    fn test_restore_browser_export() {
        let mut storage = MemoryStorage::new();
        let restored = restore_bundle(&mut storage, BROWSER_EXPORT).unwrap();
        assert_eq!(restored.len(), 5);

        let store = DayEntryStore::open(Box::new(storage.clone()), true);
        let entry = store.get(&"2026-3-7".parse().unwrap());
        assert_eq!(entry.mood, Some(Mood::GoodDay));
        assert_eq!(entry.work_note, "shipped feature");
        assert!(!ShowDayNumbers::load(&storage).unwrap().0);
    }

    #[test]
    fn test_theme_record_survives_restore_then_backup() {
        let mut storage = MemoryStorage::new();
        let bundle = r#"{"mood-calendar-show-numbers": false, "vite-ui-theme": "dark"}"#;
        restore_bundle(&mut storage, bundle).unwrap();
        let exported = export_bundle(&storage).unwrap();
        assert_eq!(exported["vite-ui-theme"], "dark");
        assert_eq!(exported["mood-calendar-show-numbers"], false);
    }

    #[test]
    fn test_unusable_keys_are_not_written() {
        let mut storage = MemoryStorage::new();
        let bundle = r#"{"../escape": 1, "": 2, ".hidden": 3, "moodbits-username": "ada"}"#;
        let restored = restore_bundle(&mut storage, bundle).unwrap();
        assert_eq!(restored, vec!["moodbits-username"]);
        assert_eq!(storage.keys().unwrap(), vec!["moodbits-username"]);
    }

    #[test]
    fn test_days_outside_the_year_are_dropped() {
        let mut storage = MemoryStorage::new();
        let bundle = r#"{"mood-calendar-2026-data": {
            "2026-3-7": {"mood": "neutral", "workLog": "", "journal": ""},
            "2026-02-30": {"mood": "goodDay", "workLog": "", "journal": ""},
            "2025-1-1": {"mood": "badDay", "workLog": "", "journal": ""}
        }}"#;
        restore_bundle(&mut storage, bundle).unwrap();
        let data = CalendarData::load(&storage).unwrap();
        assert_eq!(data.entries.len(), 1);
        assert!(data.entries.contains_key("2026-3-7"));
    }

    #[test]
    fn test_restore_replaces_record_wholesale() {
        let mut storage = MemoryStorage::new();
        let mut data = CalendarData::default();
        data.entries
            .insert("2026-1-1".to_string(), Default::default());
        data.entries.insert(
            "2026-1-2".to_string(),
            crate::calendar::DayEntry::new(Some(Mood::Nightmare), "", ""),
        );
        data.save(&mut storage).unwrap();

        restore_bundle(&mut storage, BROWSER_EXPORT).unwrap();
        let reloaded = CalendarData::load(&storage).unwrap();
        assert_eq!(reloaded.entries.len(), 1);
        assert!(reloaded.entries.contains_key("2026-3-7"));
    }

    #[test]
    fn test_malformed_json_changes_nothing() {
        let mut storage = MemoryStorage::new();
        Username("sam".to_string()).save(&mut storage).unwrap();
        let err = restore_bundle(&mut storage, "{ not json").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MoodError>(),
            Some(MoodError::RestoreParseFailure(_))
        ));
        assert_eq!(Username::load(&storage).unwrap().0, "sam");
    }

    #[test]
    fn test_non_object_is_rejected() {
        let mut storage = MemoryStorage::new();
        let err = restore_bundle(&mut storage, "[1, 2]").unwrap_err();
        assert!(format!("{err}").contains("expected a JSON object"));
    }

    #[test]
    fn test_one_bad_record_blocks_every_write() {
        let mut storage = MemoryStorage::new();
        let bundle = r#"{
            "moodbits-username": "alex",
            "mood-calendar-show-numbers": "yes please"
        }"#;
        let err = restore_bundle(&mut storage, bundle).unwrap_err();
        assert!(format!("{err}").contains("mood-calendar-show-numbers"));
        assert_eq!(storage.get("moodbits-username").unwrap(), None);
    }

    #[test]
    fn test_export_then_restore_into_fresh_storage() {
        let mut source = MemoryStorage::new();
        Username("kim".to_string()).save(&mut source).unwrap();
        ShowDayNumbers(false).save(&mut source).unwrap();
        let bundle = serde_json::to_string(&export_bundle(&source).unwrap()).unwrap();

        let mut target = MemoryStorage::new();
        restore_bundle(&mut target, &bundle).unwrap();
        assert_eq!(Username::load(&target).unwrap().0, "kim");
        assert!(!ShowDayNumbers::load(&target).unwrap().0);
    }

    #[test]
    fn test_run_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = run(tmp.path(), &tmp.path().join("nope.json"), false).unwrap_err();
        assert!(format!("{err}").contains("does not exist"));
    }

    #[test]
    fn test_run_writes_into_data_dir() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("backup.json");
        fs::write(&file, BROWSER_EXPORT).unwrap();
        let data_dir = tmp.path().join("data");
        run(&data_dir, &file, false).unwrap();
        assert!(data_dir.join("mood-calendar-2026-data.json").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("backup.json");
        fs::write(&file, BROWSER_EXPORT).unwrap();
        let data_dir = tmp.path().join("data");
        run(&data_dir, &file, true).unwrap();
        assert!(!data_dir.exists());
    }

    #[test]
    fn test_dry_run_still_rejects_malformed_bundle() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("backup.json");
        fs::write(&file, "[]").unwrap();
        assert!(run(tmp.path(), &file, true).is_err());
    }
}
