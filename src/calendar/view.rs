use serde::{Deserialize, Serialize};

/// A four-month slice of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quadrimester {
    pub label: &'static str,
    pub months: [usize; 4],
}

pub const QUADRIMESTERS: [Quadrimester; 3] = [
    Quadrimester {
        label: "Jan - Apr",
        months: [0, 1, 2, 3],
    },
    Quadrimester {
        label: "May - Aug",
        months: [4, 5, 6, 7],
    },
    Quadrimester {
        label: "Sep - Dec",
        months: [8, 9, 10, 11],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    FullYear,
    Quadrimester(usize),
}

/// How the calendar opens, as read from config.yaml.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultView {
    #[default]
    Quadrimester,
    FullYear,
}

/// Which months are on screen. The selected window survives a trip
/// through full-year mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    show_all_year: bool,
    window: usize,
}

impl ViewState {
    pub fn new(default_view: DefaultView) -> Self {
        ViewState {
            show_all_year: default_view == DefaultView::FullYear,
            window: 0,
        }
    }

    pub fn mode(&self) -> ViewMode {
        if self.show_all_year {
            ViewMode::FullYear
        } else {
            ViewMode::Quadrimester(self.window)
        }
    }

    pub fn is_full_year(&self) -> bool {
        self.show_all_year
    }

    pub fn toggle_year_view(&mut self) {
        self.show_all_year = !self.show_all_year;
    }

    /// No-op in full-year mode.
    pub fn next(&mut self) {
        if !self.show_all_year {
            self.window = (self.window + 1) % QUADRIMESTERS.len();
        }
    }

    /// No-op in full-year mode.
    pub fn prev(&mut self) {
        if !self.show_all_year {
            self.window = (self.window + QUADRIMESTERS.len() - 1) % QUADRIMESTERS.len();
        }
    }

    /// Selects the window holding `month_index` without leaving full-year mode.
    pub fn focus_month(&mut self, month_index: usize) {
        if let Some(w) = window_of(month_index) {
            self.window = w;
        }
    }

    pub fn visible_months(&self) -> Vec<usize> {
        match self.mode() {
            ViewMode::FullYear => (0..12).collect(),
            ViewMode::Quadrimester(w) => QUADRIMESTERS[w].months.to_vec(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode() {
            ViewMode::FullYear => "full year",
            ViewMode::Quadrimester(w) => QUADRIMESTERS[w].label,
        }
    }
}

pub fn window_of(month_index: usize) -> Option<usize> {
    QUADRIMESTERS
        .iter()
        .position(|q| q.months.contains(&month_index))
}
