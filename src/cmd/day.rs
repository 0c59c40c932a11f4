use crate::calendar::mood::hex;
use crate::calendar::{DateKey, DayEntry, Mood, MoodCalendar, ViewState, fill_color, tooltip_content};
use crate::data::{AppSettings, DayEntryStore, DirStorage};
use anyhow::{Context, Result};
use std::path::Path;

/// Edits requested on the command line. `mood: Some(None)` unsets the mood.
#[derive(Debug, Default)]
pub struct DayEdit {
    pub mood: Option<Option<Mood>>,
    pub work: Option<String>,
    pub journal: Option<String>,
    pub clear: bool,
}

impl DayEdit {
    fn is_empty(&self) -> bool {
        self.mood.is_none() && self.work.is_none() && self.journal.is_none() && !self.clear
    }
}

/// `none` unsets; anything else must be a mood tag.
pub fn parse_mood_arg(s: &str) -> Result<Option<Mood>> {
    if s == "none" {
        return Ok(None);
    }
    Ok(Some(s.parse::<Mood>()?))
}

pub fn run(dir: &Path, settings: &AppSettings, key: &str, edit: DayEdit) -> Result<()> {
    let key: DateKey = key
        .parse()
        .with_context(|| format!("'{key}' is not a date of the form 2026-3-7"))?;
    let store = DayEntryStore::open(Box::new(DirStorage::new(dir)), settings.prune_empty_entries);
    let mut calendar = MoodCalendar::new(store, ViewState::new(settings.default_view));

    apply_edit(&mut calendar, &key, edit)?;
    write_day(&key, &calendar.entry(&key), &mut std::io::stdout())
}

pub(crate) fn apply_edit(calendar: &mut MoodCalendar, key: &DateKey, edit: DayEdit) -> Result<()> {
    if edit.is_empty() {
        return Ok(());
    }
    if edit.clear {
        return calendar.clear_entry(key);
    }
    let mut entry = calendar.entry(key);
    if let Some(mood) = edit.mood {
        entry.mood = mood;
    }
    if let Some(work) = edit.work {
        entry.work_note = work;
    }
    if let Some(journal) = edit.journal {
        entry.journal_note = journal;
    }
    calendar.save_entry(key, entry)
}

pub(crate) fn write_day<W: std::io::Write>(key: &DateKey, entry: &DayEntry, out: &mut W) -> Result<()> {
    writeln!(out, "{} ({})", key.long_label(), key)?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "{:<10} {}",
        "Mood:",
        entry.mood.map(Mood::label).unwrap_or("(none)")
    )?;
    writeln!(out, "{:<10} {}", "Fill:", hex(fill_color(entry)))?;
    match tooltip_content(entry, key) {
        Some(tip) => {
            writeln!(out, "---")?;
            writeln!(out, "{}", tip.date_label)?;
            if let Some(work) = &tip.work_note {
                writeln!(out, "  WORK     {work}")?;
            }
            if let Some(journal) = &tip.journal_note {
                writeln!(out, "  JOURNAL  {journal}")?;
            }
        }
        None => writeln!(out, "(no notes)")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemoryStorage;

    fn calendar() -> MoodCalendar {
        MoodCalendar::new(
            DayEntryStore::open(Box::new(MemoryStorage::new()), true),
            ViewState::default(),
        )
    }

    fn render(key: &DateKey, entry: &DayEntry) -> String {
        let mut buf = Vec::new();
        write_day(key, entry, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_day_empty() {
        let key: DateKey = "2026-1-1".parse().unwrap();
        let out = render(&key, &DayEntry::default());
        assert!(out.contains("January 1, 2026 (2026-1-1)"));
        assert!(out.contains("(none)"));
        assert!(out.contains("#323232"));
        assert!(out.contains("(no notes)"));
    }

    #[test]
    fn test_write_day_with_work_note_only() {
        let key: DateKey = "2026-3-7".parse().unwrap();
        let out = render(&key, &DayEntry::new(Some(Mood::GoodDay), "shipped feature", ""));
        assert!(out.contains("A Good Day"));
        assert!(out.contains("#34C759"));
        assert!(out.contains("3/7/2026"));
        assert!(out.contains("WORK     shipped feature"));
        assert!(!out.contains("JOURNAL"));
    }

    #[test]
    fn test_parse_mood_arg() {
        assert_eq!(parse_mood_arg("none").unwrap(), None);
        assert_eq!(parse_mood_arg("goodDay").unwrap(), Some(Mood::GoodDay));
        assert!(parse_mood_arg("great").is_err());
    }

    #[test]
    fn test_apply_edit_merges_fields() {
        let mut cal = calendar();
        let key: DateKey = "2026-7-4".parse().unwrap();
        cal.save_entry(&key, DayEntry::new(Some(Mood::BadDay), "old", "kept"))
            .unwrap();
        apply_edit(
            &mut cal,
            &key,
            DayEdit {
                mood: Some(Some(Mood::GoodDay)),
                work: Some("new".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(cal.entry(&key), DayEntry::new(Some(Mood::GoodDay), "new", "kept"));
    }

    #[test]
    fn test_apply_edit_clear_wins() {
        let mut cal = calendar();
        let key: DateKey = "2026-7-4".parse().unwrap();
        cal.save_entry(&key, DayEntry::new(Some(Mood::BadDay), "x", "y"))
            .unwrap();
        apply_edit(
            &mut cal,
            &key,
            DayEdit {
                work: Some("ignored".to_string()),
                clear: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(cal.entry(&key), DayEntry::default());
    }

    #[test]
    fn test_run_rejects_invalid_key() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = run(tmp.path(), &AppSettings::default(), "2026-02-30", DayEdit::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("2026-02-30"));
    }

    #[test]
    fn test_run_persists_edit() {
        let tmp = tempfile::TempDir::new().unwrap();
        run(
            tmp.path(),
            &AppSettings::default(),
            "2026-3-7",
            DayEdit {
                mood: Some(Some(Mood::GoodDay)),
                ..Default::default()
            },
        )
        .unwrap();
        let store = DayEntryStore::open(Box::new(DirStorage::new(tmp.path())), true);
        assert_eq!(store.get(&"2026-3-7".parse().unwrap()).mood, Some(Mood::GoodDay));
    }
}
