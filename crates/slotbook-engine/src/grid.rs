//! Month-grid layout for calendar views.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Number of cells in the grid: six full weeks.
pub const GRID_CELLS: usize = 42;

/// Lay out the month containing `day` as a 42-cell grid of six weeks
/// starting on Monday.
///
/// Cells that belong to the previous or next month are `None`, so callers
/// can render them as blanks.
pub fn month_grid(day: NaiveDate) -> Vec<Option<NaiveDate>> {
    let Some(month_start) = NaiveDate::from_ymd_opt(day.year(), day.month(), 1) else {
        return Vec::new();
    };
    let offset = month_start.weekday().days_since(Weekday::Mon);
    let Some(grid_start) = month_start.checked_sub_days(Days::new(u64::from(offset))) else {
        return Vec::new();
    };

    (0..GRID_CELLS as u64)
        .map(|i| {
            grid_start
                .checked_add_days(Days::new(i))
                .filter(|cell| cell.month() == month_start.month())
        })
        .collect()
}
