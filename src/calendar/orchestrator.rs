use crate::calendar::date_key::DateKey;
use crate::calendar::entry::DayEntry;
use crate::calendar::grid::{GridCell, layout};
use crate::calendar::month_table::{MonthDescriptor, descriptor_for};
use crate::calendar::mood::Mood;
use crate::calendar::presentation::{CellPaint, Tooltip, paint, tooltip_content};
use crate::calendar::view::ViewState;
use crate::data::DayEntryStore;
use anyhow::Result;
use tracing::{debug, error};

/// Everything needed to draw and interact with one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub cell: GridCell,
    pub key: DateKey,
    pub entry: DayEntry,
    pub paint: CellPaint,
    pub tooltip: Option<Tooltip>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    pub index: usize,
    pub month: &'static MonthDescriptor,
    pub cells: Vec<DayCell>,
}

/// Ties the month table, grid layout, entry store, presentation rules and
/// view state together for one render pass or one user action.
pub struct MoodCalendar {
    store: DayEntryStore,
    view: ViewState,
}

impl MoodCalendar {
    pub fn new(store: DayEntryStore, view: ViewState) -> Self {
        MoodCalendar { store, view }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn store(&self) -> &DayEntryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DayEntryStore {
        &mut self.store
    }

    /// Months on screen for the current view, in calendar order.
    pub fn visible_months(&self) -> Vec<MonthView> {
        self.view
            .visible_months()
            .into_iter()
            .map(|i| self.month_view(i))
            .collect()
    }

    pub fn month_view(&self, index: usize) -> MonthView {
        let month = descriptor_for(index);
        let cells = layout(month)
            .into_iter()
            .filter_map(|cell| match DateKey::from_month_index(index, cell.day) {
                Ok(key) => Some(self.day_cell(cell, key)),
                Err(e) => {
                    error!(month = month.name, day = cell.day, error = %e, "layout produced a day outside the year");
                    None
                }
            })
            .collect();
        MonthView {
            index,
            month,
            cells,
        }
    }

    fn day_cell(&self, cell: GridCell, key: DateKey) -> DayCell {
        let entry = self.store.get(&key);
        DayCell {
            cell,
            key,
            paint: paint(&entry),
            tooltip: tooltip_content(&entry, &key),
            entry,
        }
    }

    pub fn entry(&self, key: &DateKey) -> DayEntry {
        self.store.get(key)
    }

    pub fn tooltip(&self, key: &DateKey) -> Option<Tooltip> {
        tooltip_content(&self.store.get(key), key)
    }

    pub fn save_entry(&mut self, key: &DateKey, entry: DayEntry) -> Result<()> {
        self.store.save(key, entry)
    }

    pub fn clear_entry(&mut self, key: &DateKey) -> Result<()> {
        self.store.clear(key)
    }

    /// Read-modify-write of the mood alone; notes are kept.
    pub fn set_mood(&mut self, key: &DateKey, mood: Option<Mood>) -> Result<()> {
        let mut entry = self.store.get(key);
        entry.mood = mood;
        self.store.save(key, entry)
    }

    pub fn toggle_year_view(&mut self) {
        self.view.toggle_year_view();
        debug!(mode = ?self.view.mode(), "view toggled");
    }

    pub fn next_window(&mut self) {
        self.view.next();
    }

    pub fn prev_window(&mut self) {
        self.view.prev();
    }

    /// Brings `key` on screen when the quadrimester view is active.
    pub fn focus(&mut self, key: &DateKey) {
        self.view.focus_month(key.month_index());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::presentation::{EMPTY_DAY_COLOR, fill_color};
    use crate::calendar::view::{DefaultView, ViewMode};
    use crate::data::persistence::MemoryStorage;

    fn calendar() -> MoodCalendar {
        let store = DayEntryStore::open(Box::new(MemoryStorage::new()), true);
        MoodCalendar::new(store, ViewState::new(DefaultView::Quadrimester))
    }

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_quadrimester_renders_its_four_months() {
        let mut cal = calendar();
        let names: Vec<_> = cal.visible_months().iter().map(|m| m.month.name).collect();
        assert_eq!(names, ["JANUARY", "FEBRUARY", "MARCH", "APRIL"]);
        cal.next_window();
        let idx: Vec<_> = cal.visible_months().iter().map(|m| m.index).collect();
        assert_eq!(idx, [4, 5, 6, 7]);
    }

    #[test]
    fn test_full_year_renders_every_day() {
        let mut cal = calendar();
        cal.toggle_year_view();
        let months = cal.visible_months();
        assert_eq!(months.len(), 12);
        let days: usize = months.iter().map(|m| m.cells.len()).sum();
        assert_eq!(days, 365);
    }

    #[test]
    fn test_cells_carry_keys_matching_their_day() {
        let cal = calendar();
        let march = cal.month_view(2);
        for c in &march.cells {
            assert_eq!(c.key.month(), 3);
            assert_eq!(c.key.day(), c.cell.day);
        }
    }

    #[test]
    fn test_mood_and_work_note_scenario() {
        let mut cal = calendar();
        let k = key("2026-3-7");
        cal.save_entry(&k, DayEntry::new(Some(Mood::GoodDay), "shipped feature", ""))
            .unwrap();

        let entry = cal.entry(&k);
        assert_eq!(entry, DayEntry::new(Some(Mood::GoodDay), "shipped feature", ""));
        assert_eq!(fill_color(&entry), Mood::GoodDay.color());

        let tip = cal.tooltip(&k).unwrap();
        assert_eq!(tip.work_note.as_deref(), Some("shipped feature"));
        assert!(tip.journal_note.is_none());

        let cell = cal
            .month_view(2)
            .cells
            .into_iter()
            .find(|c| c.key == k)
            .unwrap();
        assert_eq!(cell.paint.fill, Mood::GoodDay.color());
        assert_eq!(cell.paint.mood, Some(Mood::GoodDay));
        assert!(cell.tooltip.is_some());
    }

    #[test]
    fn test_clear_returns_to_empty_color() {
        let mut cal = calendar();
        let k = key("2026-11-30");
        cal.save_entry(&k, DayEntry::new(Some(Mood::Nightmare), "a", "b"))
            .unwrap();
        cal.clear_entry(&k).unwrap();
        assert_eq!(cal.entry(&k), DayEntry::default());
        assert_eq!(fill_color(&cal.entry(&k)), EMPTY_DAY_COLOR);
        assert!(cal.tooltip(&k).is_none());
    }

    #[test]
    fn test_set_mood_keeps_notes() {
        let mut cal = calendar();
        let k = key("2026-5-5");
        cal.save_entry(&k, DayEntry::new(None, "w", "j")).unwrap();
        cal.set_mood(&k, Some(Mood::CoreMemory)).unwrap();
        assert_eq!(cal.entry(&k), DayEntry::new(Some(Mood::CoreMemory), "w", "j"));
        cal.set_mood(&k, None).unwrap();
        assert_eq!(cal.entry(&k), DayEntry::new(None, "w", "j"));
    }

    #[test]
    fn test_year_toggle_round_trip_keeps_window() {
        let mut cal = calendar();
        cal.next_window();
        assert_eq!(cal.view().mode(), ViewMode::Quadrimester(1));
        cal.toggle_year_view();
        assert_eq!(cal.view().mode(), ViewMode::FullYear);
        cal.toggle_year_view();
        assert_eq!(cal.view().mode(), ViewMode::Quadrimester(1));
    }

    #[test]
    fn test_focus_switches_window() {
        let mut cal = calendar();
        cal.focus(&key("2026-10-1"));
        assert_eq!(cal.view().mode(), ViewMode::Quadrimester(2));
    }

    #[test]
    fn test_observer_sees_orchestrator_writes() {
        use std::cell::Cell;
        use std::rc::Rc;
        let mut cal = calendar();
        let dirty = Rc::new(Cell::new(false));
        let flag = dirty.clone();
        cal.store_mut().subscribe(move |_, _| flag.set(true));
        cal.set_mood(&key("2026-1-1"), Some(Mood::Neutral)).unwrap();
        assert!(dirty.get());
    }
}
