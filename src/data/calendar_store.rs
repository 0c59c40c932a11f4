use crate::calendar::{DateKey, DayEntry};
use crate::data::persistence::{Persistable, Storage};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Every recorded day, keyed by the `DateKey` string.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct CalendarData {
    pub entries: BTreeMap<String, DayEntry>,
}

impl Persistable for CalendarData {
    fn key() -> &'static str {
        "mood-calendar-2026-data"
    }
}

impl CalendarData {
    /// Days of the year with a mood or a note. Keys that name no day of the
    /// year are not counted.
    pub fn recorded_days(&self) -> usize {
        DateKey::all()
            .filter(|k| self.entries.get(&k.to_string()).is_some_and(|e| !e.is_empty()))
            .count()
    }
}

pub type Observer = Box<dyn FnMut(&DateKey, &DayEntry)>;

/// The calendar record plus write-through persistence. Every save replaces
/// one day wholesale and rewrites the whole record before returning.
pub struct DayEntryStore {
    data: CalendarData,
    storage: Box<dyn Storage>,
    observers: Vec<Observer>,
    prune_empty: bool,
}

impl DayEntryStore {
    /// Loads the record; an unreadable or corrupt record starts empty.
    pub fn open(storage: Box<dyn Storage>, prune_empty: bool) -> Self {
        let data = CalendarData::load_or_default(storage.as_ref());
        debug!(days = data.entries.len(), "calendar data loaded");
        DayEntryStore {
            data,
            storage,
            observers: Vec::new(),
            prune_empty,
        }
    }

    /// Recorded entry for `key`, or the empty entry.
    pub fn get(&self, key: &DateKey) -> DayEntry {
        self.data
            .entries
            .get(&key.to_string())
            .cloned()
            .unwrap_or_default()
    }

    pub fn save(&mut self, key: &DateKey, entry: DayEntry) -> Result<()> {
        let k = key.to_string();
        let previous = if entry.is_empty() && self.prune_empty {
            self.data.entries.remove(&k)
        } else {
            self.data.entries.insert(k.clone(), entry.clone())
        };

        if let Err(e) = self.data.save(self.storage.as_mut()) {
            match previous {
                Some(p) => self.data.entries.insert(k, p),
                None => self.data.entries.remove(&k),
            };
            return Err(e);
        }

        info!(key = %key, mood = ?entry.mood, "day entry saved");
        for observer in &mut self.observers {
            observer(key, &entry);
        }
        Ok(())
    }

    pub fn clear(&mut self, key: &DateKey) -> Result<()> {
        self.save(key, DayEntry::default())
    }

    /// Registers a callback run after every successful save or clear.
    pub fn subscribe(&mut self, observer: impl FnMut(&DateKey, &DayEntry) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn data(&self) -> &CalendarData {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Mood;
    use crate::data::persistence::{DirStorage, MemoryStorage};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn store(storage: &MemoryStorage, prune: bool) -> DayEntryStore {
        DayEntryStore::open(Box::new(storage.clone()), prune)
    }

    #[test]
    fn test_get_missing_returns_empty_entry() {
        let s = store(&MemoryStorage::new(), true);
        assert_eq!(s.get(&key("2026-1-1")), DayEntry::default());
    }

    #[test]
    fn test_save_then_get_roundtrip() {
        let mut s = store(&MemoryStorage::new(), true);
        let entry = DayEntry::new(Some(Mood::BadDay), "meetings", "rain all day");
        s.save(&key("2026-6-15"), entry.clone()).unwrap();
        assert_eq!(s.get(&key("2026-6-15")), entry);
    }

    #[test]
    fn test_save_replaces_wholesale() {
        let mut s = store(&MemoryStorage::new(), true);
        let k = key("2026-2-2");
        s.save(&k, DayEntry::new(Some(Mood::GoodDay), "work", "journal"))
            .unwrap();
        s.save(&k, DayEntry::new(None, "only work", "")).unwrap();
        assert_eq!(s.get(&k), DayEntry::new(None, "only work", ""));
    }

    #[test]
    fn test_save_writes_through_to_storage() {
        let storage = MemoryStorage::new();
        let mut s = store(&storage, true);
        s.save(&key("2026-3-7"), DayEntry::new(Some(Mood::GoodDay), "", ""))
            .unwrap();

        let reopened = store(&storage, true);
        assert_eq!(reopened.get(&key("2026-3-7")).mood, Some(Mood::GoodDay));
        let raw = storage.get("mood-calendar-2026-data").unwrap().unwrap();
        assert!(raw.contains("\"2026-3-7\""));
    }

    #[test]
    fn test_clear_resets_to_empty_and_prunes() {
        let storage = MemoryStorage::new();
        let mut s = store(&storage, true);
        let k = key("2026-4-1");
        s.save(&k, DayEntry::new(Some(Mood::Nightmare), "x", "y")).unwrap();
        s.clear(&k).unwrap();
        assert_eq!(s.get(&k), DayEntry::default());
        assert!(!s.data().entries.contains_key("2026-4-1"));
    }

    #[test]
    fn test_clear_without_pruning_keeps_empty_record() {
        let mut s = store(&MemoryStorage::new(), false);
        let k = key("2026-4-1");
        s.save(&k, DayEntry::new(Some(Mood::Nightmare), "", "")).unwrap();
        s.clear(&k).unwrap();
        assert_eq!(s.get(&k), DayEntry::default());
        assert_eq!(s.data().entries.get("2026-4-1"), Some(&DayEntry::default()));
        assert_eq!(s.data().recorded_days(), 0);
    }

    #[test]
    fn test_observers_run_after_save_and_clear() {
        let mut s = store(&MemoryStorage::new(), true);
        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = seen.clone();
        s.subscribe(move |k, e| sink.borrow_mut().push(format!("{k}:{}", e.is_empty())));

        let k = key("2026-8-8");
        s.save(&k, DayEntry::new(None, "note", "")).unwrap();
        s.clear(&k).unwrap();
        assert_eq!(*seen.borrow(), vec!["2026-8-8:false", "2026-8-8:true"]);
    }

    #[test]
    fn test_corrupt_record_opens_empty() {
        let mut storage = MemoryStorage::new();
        storage.set("mood-calendar-2026-data", "{\"2026-1-1\": 42}").unwrap();
        let s = store(&storage, true);
        assert!(s.data().entries.is_empty());
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let tmp = TempDir::new().unwrap();
        let mut s = DayEntryStore::open(Box::new(DirStorage::new(tmp.path())), true);
        // Occupy the record path with a directory so the write fails.
        std::fs::create_dir(tmp.path().join("mood-calendar-2026-data.json")).unwrap();

        let k = key("2026-9-9");
        let result = s.save(&k, DayEntry::new(Some(Mood::GoodDay), "", ""));
        assert!(result.is_err());
        assert_eq!(s.get(&k), DayEntry::default());
    }

    #[test]
    fn test_reads_browser_export_shape() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                "mood-calendar-2026-data",
                r#"{"2026-1-5": {"mood": "neutral", "workLog": "", "journal": "ok"},
                    "2026-1-6": {"mood": null, "workLog": "", "journal": ""}}"#,
            )
            .unwrap();
        let s = store(&storage, true);
        assert_eq!(s.get(&key("2026-1-5")).mood, Some(Mood::Neutral));
        assert_eq!(s.get(&key("2026-1-6")), DayEntry::default());
        assert_eq!(s.data().recorded_days(), 1);
    }

    #[test]
    fn test_recorded_days_ignores_keys_outside_the_year() {
        let mut data = CalendarData::default();
        let noted = DayEntry::new(None, "note", "");
        data.entries.insert("2026-2-30".to_string(), noted.clone());
        data.entries.insert("2025-12-31".to_string(), noted.clone());
        data.entries.insert("2026-2-28".to_string(), noted);
        assert_eq!(data.recorded_days(), 1);
    }
}
