//! Month-grid construction and year-window helpers
//!
//! The heatmap lays a year out as twelve fixed 6x7 month blocks. Each block
//! starts on the Sunday on or before the 1st of its month and runs 42
//! consecutive calendar days, so trailing cells spill into the adjacent
//! months. The builder never prunes those spill cells; consumers flag them
//! with [`in_month`].

use chrono::{Datelike, Duration, NaiveDate};

/// Weeks per month block
pub const GRID_WEEKS: usize = 6;
/// Days per week column
pub const GRID_DAYS: usize = 7;

/// Short month labels, indexed by zero-based month
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short weekday labels, Sunday-first to match the grid rows
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One month block of the heatmap: 6 week columns of 7 days each
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// Short display label ("Jan" .. "Dec")
    pub name: &'static str,
    /// Week-major: `weeks[w][d]` is day `d` (0 = Sunday) of week column `w`
    pub weeks: [[NaiveDate; GRID_DAYS]; GRID_WEEKS],
}

/// Build the 6x7 grid for `(year, month0)` with `month0` in `0..=11`.
///
/// The anchor is the Sunday on or before the 1st of the month; cells advance
/// one calendar day each, so every grid is 42 strictly consecutive dates
/// regardless of month length or year boundary.
pub fn build_month_grid(year: i32, month0: u32) -> MonthGrid {
    debug_assert!(month0 < 12, "month0 out of range: {}", month0);

    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .expect("month0 in 0..=11 always forms a valid first-of-month");
    let anchor = first - Duration::days(i64::from(first.weekday().num_days_from_sunday()));

    let mut weeks = [[anchor; GRID_DAYS]; GRID_WEEKS];
    let mut cur = anchor;
    for week in weeks.iter_mut() {
        for day in week.iter_mut() {
            *day = cur;
            cur += Duration::days(1);
        }
    }

    MonthGrid {
        name: MONTH_NAMES[month0 as usize],
        weeks,
    }
}

/// Build all twelve month grids for a year
pub fn year_grids(year: i32) -> Vec<MonthGrid> {
    (0..12).map(|m| build_month_grid(year, m)).collect()
}

/// Whether a grid cell belongs to its target `(year, month0)` rather than
/// being alignment spill from an adjacent month
pub fn in_month(date: NaiveDate, year: i32, month0: u32) -> bool {
    date.year() == year && date.month0() == month0
}

/// Rolling 5-year selection window ending at `current`, oldest first
pub fn year_window(current: i32) -> [i32; 5] {
    [current - 4, current - 3, current - 2, current - 1, current]
}

/// Constrain a requested year into the rolling window ending at `current`
pub fn clamp_year(year: i32, current: i32) -> i32 {
    year.clamp(current - 4, current)
}
