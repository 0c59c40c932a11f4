use crate::calendar::month_table::MonthDescriptor;

/// Rows a month can need in the worst case (31 days starting on a Saturday or Sunday).
pub const MAX_WEEKS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub day: u32,
    pub week: usize,
    /// 0 = Monday .. 6 = Sunday
    pub column: usize,
}

/// Places every day of `month` on a week-row / weekday-column grid,
/// in ascending day order.
///
/// Panics when `month.days` is zero or `month.start_day` is not a weekday
/// index; both can only come from a malformed table.
pub fn layout(month: &MonthDescriptor) -> Vec<GridCell> {
    assert!(month.days >= 1, "{} has no days", month.name);
    assert!(
        month.start_day < 7,
        "{} starts on weekday {}",
        month.name,
        month.start_day
    );

    let mut cells = Vec::with_capacity(month.days as usize);
    let mut column = month.start_day as usize;
    let mut week = 0;
    for day in 1..=month.days {
        cells.push(GridCell { day, week, column });
        column += 1;
        if column == 7 {
            column = 0;
            week += 1;
        }
    }
    cells
}

/// Number of week-rows `layout` uses for `month`.
pub fn week_rows(month: &MonthDescriptor) -> usize {
    (month.start_day as usize + month.days as usize).div_ceil(7)
}
