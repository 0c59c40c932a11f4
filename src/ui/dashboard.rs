use crate::calendar::grid::week_rows;
use crate::calendar::presentation::mood_caption;
use crate::calendar::{
    DateKey, DayCell, DayEntry, MAX_WEEKS, Mood, MonthView, MoodCalendar, WEEKDAY_LABELS,
};
use crate::data::{Preferences, TodoList};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use std::cell::Cell as FlagCell;
use std::io::Stdout;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration as StdDuration;
use tracing::error;

// Four characters per weekday column: " 07 ", "[07]" or "MON ".
const CELL_WIDTH: u16 = 4;
const MONTH_WIDTH: u16 = CELL_WIDTH * 7;
// Title + weekday header + six week rows + one blank line.
const MONTH_HEIGHT: u16 = 2 + MAX_WEEKS as u16 + 1;
const TASK_PANEL_WIDTH: u16 = 34;

const ACCENT: Color = Color::Rgb(0x00, 0xC0, 0xE8);

#[derive(PartialEq, Debug, Clone, Copy)]
enum Mode {
    Normal,
    Edit,
    AddTask,
    EditName,
}

#[derive(PartialEq, Debug, Clone, Copy, Default)]
enum Screen {
    #[default]
    Calendar,
    Tasks,
    Settings,
}

#[derive(PartialEq, Debug, Clone, Copy, Default)]
enum Field {
    #[default]
    Mood,
    Work,
    Journal,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Mood => Field::Work,
            Field::Work => Field::Journal,
            Field::Journal => Field::Mood,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Mood => Field::Journal,
            Field::Work => Field::Mood,
            Field::Journal => Field::Work,
        }
    }
}

/// Editor state for the selected day. Nothing is written until Enter.
#[derive(Debug, Default)]
struct Draft {
    mood: Option<Mood>,
    work: String,
    journal: String,
    field: Field,
}

impl Draft {
    fn from_entry(entry: DayEntry) -> Self {
        Draft {
            mood: entry.mood,
            work: entry.work_note,
            journal: entry.journal_note,
            field: Field::Mood,
        }
    }

    fn to_entry(&self) -> DayEntry {
        DayEntry::new(self.mood, &self.work, &self.journal)
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            Field::Mood => None,
            Field::Work => Some(&mut self.work),
            Field::Journal => Some(&mut self.journal),
        }
    }
}

const SETTINGS_ROWS: usize = 4;

pub struct App {
    calendar: MoodCalendar,
    prefs: Preferences,
    todos: TodoList,
    selected: DateKey,
    mode: Mode,
    screen: Screen,
    draft: Draft,
    input_buffer: String,
    /// Selected row on the tasks and settings screens.
    list_cursor: usize,
    /// Last action result, cleared on the next keypress.
    status: Option<(String, Color)>,
    /// Set by the entry store observer and by key handling; the event loop
    /// only redraws when it is set.
    dirty: Rc<FlagCell<bool>>,
    data_dir: PathBuf,
}

impl App {
    pub fn new(
        mut calendar: MoodCalendar,
        prefs: Preferences,
        todos: TodoList,
        today: NaiveDate,
        data_dir: PathBuf,
    ) -> Self {
        // The view opens as configured; today is selected only when it is on screen.
        let visible = calendar.view().visible_months();
        let selected = DateKey::new(today.year(), today.month(), today.day())
            .ok()
            .filter(|key| visible.contains(&key.month_index()))
            .or_else(|| {
                visible
                    .first()
                    .and_then(|&m| DateKey::from_month_index(m, 1).ok())
            })
            .unwrap_or_else(DateKey::first);

        let dirty = Rc::new(FlagCell::new(true));
        let flag = Rc::clone(&dirty);
        calendar
            .store_mut()
            .subscribe(move |_, _| flag.set(true));

        App {
            calendar,
            prefs,
            todos,
            selected,
            mode: Mode::Normal,
            screen: Screen::Calendar,
            draft: Draft::default(),
            input_buffer: String::new(),
            list_cursor: 0,
            status: None,
            dirty,
            data_dir,
        }
    }

    fn report(&mut self, what: &str, result: Result<()>) {
        if let Err(e) = result {
            error!(error = %format!("{e:#}"), "{what} failed");
            self.status = Some((format!("{what} failed: {e}"), Color::Red));
        }
    }

    fn move_selection(&mut self, days: i64) {
        if let Some(key) = self.selected.offset(days) {
            self.selected = key;
            // Full-year mode keeps the window that toggling back restores.
            if !self.calendar.view().is_full_year() {
                self.calendar.focus(&key);
            }
        }
    }

    fn open_editor(&mut self) {
        self.draft = Draft::from_entry(self.calendar.entry(&self.selected));
        self.mode = Mode::Edit;
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.dirty.set(true);
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.status = None;

        match self.mode {
            Mode::Edit => {
                self.handle_edit_key(code, modifiers);
                return false;
            }
            Mode::AddTask => {
                self.handle_add_task_key(code);
                return false;
            }
            Mode::EditName => {
                self.handle_edit_name_key(code);
                return false;
            }
            Mode::Normal => {}
        }

        match self.screen {
            Screen::Tasks => {
                self.handle_tasks_key(code);
                return false;
            }
            Screen::Settings => {
                self.handle_settings_key(code);
                return false;
            }
            Screen::Calendar => {}
        }

        match code {
            KeyCode::Left => self.move_selection(-1),
            KeyCode::Right => self.move_selection(1),
            KeyCode::Up => self.move_selection(-7),
            KeyCode::Down => self.move_selection(7),
            KeyCode::Char('n') => self.calendar.next_window(),
            KeyCode::Char('p') => self.calendar.prev_window(),
            KeyCode::Char('y') => self.calendar.toggle_year_view(),
            KeyCode::Enter => self.open_editor(),
            KeyCode::Char('x') => {
                let result = self.calendar.clear_entry(&self.selected);
                self.report("Clear", result);
            }
            KeyCode::Char('#') => {
                let result = self.prefs.toggle_show_numbers();
                self.report("Saving preference", result);
            }
            KeyCode::Char('t') => {
                self.screen = Screen::Tasks;
                self.list_cursor = 0;
            }
            KeyCode::Char('o') => {
                self.screen = Screen::Settings;
                self.list_cursor = 0;
            }
            KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    fn handle_edit_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
            }
            KeyCode::Enter => {
                let entry = self.draft.to_entry();
                let result = self.calendar.save_entry(&self.selected, entry);
                if result.is_ok() {
                    self.status = Some((
                        format!("Saved {}", self.selected.long_label()),
                        Color::Green,
                    ));
                }
                self.report("Save", result);
                self.mode = Mode::Normal;
            }
            KeyCode::Char('k') if modifiers.contains(KeyModifiers::CONTROL) => {
                let result = self.calendar.clear_entry(&self.selected);
                self.report("Clear", result);
                self.mode = Mode::Normal;
            }
            KeyCode::Tab => self.draft.field = self.draft.field.next(),
            KeyCode::BackTab => self.draft.field = self.draft.field.prev(),
            _ => match self.draft.field {
                Field::Mood => match code {
                    KeyCode::Left => self.draft.mood = Some(Mood::cycle_prev(self.draft.mood)),
                    KeyCode::Right => self.draft.mood = Some(Mood::cycle_next(self.draft.mood)),
                    KeyCode::Backspace => self.draft.mood = None,
                    KeyCode::Char(c @ '1'..='5') => {
                        let i = c as usize - '1' as usize;
                        self.draft.mood = Some(Mood::ALL[i]);
                    }
                    _ => {}
                },
                Field::Work | Field::Journal => {
                    if let Some(text) = self.draft.text_mut() {
                        match code {
                            KeyCode::Char(c)
                                if modifiers == KeyModifiers::NONE
                                    || modifiers == KeyModifiers::SHIFT =>
                            {
                                text.push(c)
                            }
                            KeyCode::Backspace => {
                                text.pop();
                            }
                            _ => {}
                        }
                    }
                }
            },
        }
    }

    fn handle_tasks_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => {
                if self.list_cursor > 0 {
                    self.list_cursor -= 1;
                }
            }
            KeyCode::Down => {
                if self.list_cursor + 1 < self.todos.len() {
                    self.list_cursor += 1;
                }
            }
            KeyCode::Char('a') => {
                self.input_buffer.clear();
                self.mode = Mode::AddTask;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                let result = self.todos.toggle_at(self.list_cursor);
                self.report("Saving tasks", result);
            }
            KeyCode::Char('d') => {
                let result = self.todos.remove_at(self.list_cursor);
                self.report("Saving tasks", result);
                if self.list_cursor > 0 && self.list_cursor >= self.todos.len() {
                    self.list_cursor -= 1;
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.screen = Screen::Calendar;
            }
            _ => {}
        }
    }

    fn handle_add_task_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let text = std::mem::take(&mut self.input_buffer);
                let result = self.todos.add(&text).map(|added| {
                    if added {
                        self.list_cursor = 0;
                    }
                });
                self.report("Saving tasks", result);
                self.mode = Mode::Normal;
            }
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.mode = Mode::Normal;
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => self.input_buffer.push(c),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => {
                if self.list_cursor > 0 {
                    self.list_cursor -= 1;
                }
            }
            KeyCode::Down => {
                if self.list_cursor + 1 < SETTINGS_ROWS {
                    self.list_cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let result = match self.list_cursor {
                    0 => self.prefs.toggle_tasks(),
                    1 => self.prefs.toggle_calendar(),
                    2 => self.prefs.toggle_show_numbers(),
                    _ => {
                        self.input_buffer = self.prefs.username.clone();
                        self.mode = Mode::EditName;
                        Ok(())
                    }
                };
                self.report("Saving preference", result);
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.screen = Screen::Calendar;
            }
            _ => {}
        }
    }

    fn handle_edit_name_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let name = std::mem::take(&mut self.input_buffer);
                let name = name.trim();
                if !name.is_empty() {
                    let result = self.prefs.set_username(name);
                    self.report("Saving preference", result);
                }
                self.mode = Mode::Normal;
            }
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.mode = Mode::Normal;
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => self.input_buffer.push(c),
            _ => {}
        }
    }

    pub fn render(&self, f: &mut Frame) {
        let area = f.area();
        match self.screen {
            Screen::Tasks => self.render_tasks_view(f, area),
            Screen::Settings => self.render_settings_view(f, area),
            Screen::Calendar => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1), // title
                        Constraint::Min(MONTH_HEIGHT),
                        Constraint::Length(7), // tooltip / editor
                        Constraint::Length(6), // help table
                        Constraint::Length(1), // footer
                    ])
                    .split(area);

                self.render_title(f, chunks[0]);
                self.render_widgets(f, chunks[1]);
                if self.mode == Mode::Edit {
                    self.render_editor(f, chunks[2]);
                } else {
                    self.render_day_details(f, chunks[2]);
                }
                self.render_help(f, chunks[3]);
                self.render_footer(f, chunks[4]);
            }
        }
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let view = self.calendar.view();
        let nav = if view.is_full_year() { "" } else { "◀ p  n ▶   " };
        let recorded = self.calendar.store().data().recorded_days();
        let line = Line::from(vec![
            Span::styled(
                "moodbits ",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{}  ", view.title()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(nav, Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{recorded} days recorded"),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn render_widgets(&self, f: &mut Frame, area: Rect) {
        let widgets = self.prefs.widgets;
        match (widgets.show_calendar, widgets.show_tasks) {
            (true, true) => {
                let chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Min(0), Constraint::Length(TASK_PANEL_WIDTH)])
                    .split(area);
                self.render_calendar(f, chunks[0]);
                self.render_task_panel(f, chunks[1]);
            }
            (true, false) => self.render_calendar(f, area),
            (false, true) => self.render_task_panel(f, area),
            (false, false) => {
                let p = Paragraph::new("no widgets enabled")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray));
                f.render_widget(p, area);
            }
        }
    }

    fn render_calendar(&self, f: &mut Frame, area: Rect) {
        let months = self.calendar.visible_months();
        // Four months per row: one row for a quadrimester, three for the year.
        let rows = months.len().div_ceil(4);
        let row_rects = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(MONTH_HEIGHT); rows])
            .split(area);

        for (r, chunk) in months.chunks(4).enumerate() {
            let col_rects = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(MONTH_WIDTH + 2),
                    Constraint::Length(MONTH_WIDTH + 2),
                    Constraint::Length(MONTH_WIDTH + 2),
                    Constraint::Length(MONTH_WIDTH + 2),
                    Constraint::Min(0),
                ])
                .split(row_rects[r]);
            for (i, month) in chunk.iter().enumerate() {
                let lines = month_lines(month, self.selected, self.prefs.show_numbers);
                f.render_widget(Paragraph::new(lines), col_rects[i]);
            }
        }
    }

    fn render_task_panel(&self, f: &mut Frame, area: Rect) {
        let data = &self.todos.data;
        let mut lines: Vec<Line> = Vec::new();
        if data.todos.is_empty() {
            lines.push(Line::from(Span::styled(
                "no tasks yet",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for t in &data.todos {
            lines.push(task_line(&t.text, t.completed));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("moodbits of {}", self.prefs.username.to_lowercase()),
            Style::default().fg(Color::DarkGray),
        )));

        let title = format!(" Tasks {}/{} ", data.completed_count(), data.todos.len());
        let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(p, area);
    }

    fn render_day_details(&self, f: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();

        if let Some((msg, color)) = &self.status {
            lines.push(Line::from(Span::styled(
                msg.clone(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )));
        }

        match self.calendar.tooltip(&self.selected) {
            Some(tip) => {
                let mut header = vec![Span::styled(
                    tip.date_label.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )];
                if let Some(mood) = tip.mood {
                    header.push(Span::raw("  "));
                    header.push(mood_span(mood));
                }
                lines.push(Line::from(header));
                if let Some(work) = &tip.work_note {
                    lines.push(note_line("WORK", work));
                }
                if let Some(journal) = &tip.journal_note {
                    lines.push(note_line("JOURNAL", journal));
                }
            }
            None => {
                let entry = self.calendar.entry(&self.selected);
                let mut header = vec![Span::styled(
                    self.selected.short_label(),
                    Style::default().add_modifier(Modifier::BOLD),
                )];
                header.push(Span::raw("  "));
                match entry.mood {
                    Some(mood) => header.push(mood_span(mood)),
                    None => header.push(Span::styled(
                        "(no entry)",
                        Style::default().fg(Color::DarkGray),
                    )),
                }
                lines.push(Line::from(header));
            }
        }

        let p = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
        f.render_widget(p, area);
    }

    fn render_editor(&self, f: &mut Frame, area: Rect) {
        let focus = |field: Field| {
            if self.draft.field == field {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        };

        let mut swatches = vec![Span::styled("  Mood     ", focus(Field::Mood))];
        for (i, mood) in Mood::ALL.iter().enumerate() {
            let marker = if self.draft.mood == Some(*mood) {
                format!("[{}]", i + 1)
            } else {
                format!(" {} ", i + 1)
            };
            swatches.push(Span::styled(
                marker,
                Style::default().fg(mood.contrast()).bg(mood.color()),
            ));
            swatches.push(Span::raw(" "));
        }
        swatches.push(Span::raw(" "));
        swatches.push(Span::raw(mood_caption(self.draft.mood)));

        let cursor = |field: Field| if self.draft.field == field { "_" } else { "" };
        let lines = vec![
            Line::from(Span::styled(
                self.selected.long_label(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(swatches),
            Line::from(vec![
                Span::styled("  Work log ", focus(Field::Work)),
                Span::raw(format!("{}{}", self.draft.work, cursor(Field::Work))),
            ]),
            Line::from(vec![
                Span::styled("  Journal  ", focus(Field::Journal)),
                Span::raw(format!("{}{}", self.draft.journal, cursor(Field::Journal))),
            ]),
            Line::from(Span::styled(
                "  Tab=next field  ←→/1-5=mood  Enter=save  Ctrl+K=clear  Esc=cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let p = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
        f.render_widget(p, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let year_action = if self.calendar.view().is_full_year() {
            "Quadrimester view"
        } else {
            "Full year view"
        };
        let key_rows: Vec<Row> = vec![
            Row::new(vec!["← → ↑ ↓", "Move day", "n / p", "Next/prev months"]),
            Row::new(vec!["Enter", "Edit day", "x", "Clear day"]),
            Row::new(vec!["y", year_action, "#", "Toggle day numbers"]),
            Row::new(vec!["t", "Tasks", "o", "Settings"]),
            Row::new(vec!["q/Ctrl+C", "Quit", "", ""]),
        ];
        let help_table = Table::new(
            key_rows,
            [
                Constraint::Length(12),
                Constraint::Length(20),
                Constraint::Length(12),
                Constraint::Length(22),
            ],
        )
        .block(Block::default().borders(Borders::NONE))
        .column_spacing(1);
        f.render_widget(help_table, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Data  ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                self.data_dir.to_string_lossy().to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        f.render_widget(footer, area);
    }

    // ── Tasks View ────────────────────────────────────────────────────────────

    fn render_tasks_view(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // task table
                Constraint::Length(3), // hints
            ])
            .split(area);

        let data = &self.todos.data;
        let rows: Vec<Row> = data
            .todos
            .iter()
            .map(|t| {
                let mark = if t.completed { "[x]" } else { "[ ]" };
                let style = if t.completed {
                    Style::default().add_modifier(Modifier::CROSSED_OUT | Modifier::DIM)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(format!("  {}", mark)),
                    Cell::from(t.text.clone()).style(style),
                ])
            })
            .collect();

        let mut table_state = TableState::default();
        if !data.todos.is_empty() {
            table_state.select(Some(self.list_cursor));
        }

        let title = format!(
            " Tasks {}/{}  (a=add  Space=toggle  d=delete  Esc=back) ",
            data.completed_count(),
            data.todos.len()
        );
        let table = Table::new(rows, [Constraint::Length(6), Constraint::Min(20)])
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_stateful_widget(table, chunks[0], &mut table_state);

        let hint = if self.mode == Mode::AddTask {
            format!("New task: {}_   Enter=add  Esc=cancel", self.input_buffer)
        } else {
            format!("moodbits of {}", self.prefs.username.to_lowercase())
        };
        let hints = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(hints, chunks[1]);
    }

    // ── Settings View ─────────────────────────────────────────────────────────

    fn render_settings_view(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // settings table
                Constraint::Length(3), // hints
            ])
            .split(area);

        let header = Row::new(vec![
            Cell::from("Setting").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Value").style(Style::default().add_modifier(Modifier::BOLD)),
        ]);

        let on_off = |b: bool| if b { "on" } else { "off" }.to_string();
        let username = if self.mode == Mode::EditName {
            format!("{}_", self.input_buffer)
        } else {
            self.prefs.username.clone()
        };
        let fields = [
            ("Show tasks", on_off(self.prefs.widgets.show_tasks)),
            ("Show calendar", on_off(self.prefs.widgets.show_calendar)),
            ("Show day numbers", on_off(self.prefs.show_numbers)),
            ("Username", username),
        ];

        let rows: Vec<Row> = fields
            .into_iter()
            .map(|(label, value)| {
                Row::new(vec![Cell::from(format!("  {}", label)), Cell::from(value)])
            })
            .collect();

        let mut table_state = TableState::default();
        table_state.select(Some(self.list_cursor));

        let table = Table::new(rows, [Constraint::Length(22), Constraint::Min(30)])
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Settings  (↑↓=select  Enter=toggle/edit  Esc=back) "),
            )
            .row_highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );

        f.render_stateful_widget(table, chunks[0], &mut table_state);

        let hint_text = if self.mode == Mode::EditName {
            "Type new name  Enter=save  Esc=cancel"
        } else {
            "↑↓=select  Enter=toggle/edit  Esc=back to calendar"
        };
        let hints = Paragraph::new(Line::from(Span::styled(
            hint_text,
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(hints, chunks[1]);
    }
}

// ── Line construction helpers ─────────────────────────────────────────────────

/// Title, weekday header and padded week rows for one month.
fn month_lines(month: &MonthView, selected: DateKey, show_numbers: bool) -> Vec<Line<'static>> {
    let title_style = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{:^width$}", month.month.name, width = MONTH_WIDTH as usize),
            title_style,
        )),
        Line::from(Span::styled(
            WEEKDAY_LABELS
                .iter()
                .map(|l| format!("{:<width$}", l, width = CELL_WIDTH as usize))
                .collect::<String>(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let mut weeks: Vec<Vec<Span<'static>>> = vec![Vec::new(); week_rows(month.month)];
    for cell in &month.cells {
        let row = &mut weeks[cell.cell.week];
        while row.len() < cell.cell.column {
            row.push(Span::raw(" ".repeat(CELL_WIDTH as usize)));
        }
        row.push(day_span(cell, cell.key == selected, show_numbers));
    }
    lines.extend(weeks.into_iter().map(Line::from));
    lines
}

/// A single day cell painted with its fill; the selected day is bracketed.
fn day_span(cell: &DayCell, is_selected: bool, show_numbers: bool) -> Span<'static> {
    let body = if show_numbers {
        format!("{:02}", cell.key.day())
    } else {
        "  ".to_string()
    };
    let text = if is_selected {
        format!("[{}]", body)
    } else {
        format!(" {} ", body)
    };
    let mut style = Style::default().fg(cell.paint.text).bg(cell.paint.fill);
    if is_selected {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(text, style)
}

fn mood_span(mood: Mood) -> Span<'static> {
    Span::styled(
        format!(" {} ", mood.label()),
        Style::default().fg(mood.contrast()).bg(mood.color()),
    )
}

fn note_line(label: &str, text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<9}", label),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        ),
        Span::raw(text.to_string()),
    ])
}

fn task_line(text: &str, completed: bool) -> Line<'static> {
    if completed {
        Line::from(Span::styled(
            format!("[x] {}", text),
            Style::default().add_modifier(Modifier::CROSSED_OUT | Modifier::DIM),
        ))
    } else {
        Line::from(format!("[ ] {}", text))
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        if app.dirty.replace(false) {
            terminal.draw(|f| app.render(f))?;
        }
        if event::poll(StdDuration::from_millis(16))? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
                CEvent::Resize(_, _) => app.dirty.set(true),
                _ => {}
            }
        }
    }
    Ok(())
}
