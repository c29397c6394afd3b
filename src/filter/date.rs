//! Date-range filtering on the lead creation day.

use crate::parser::LeadRecord;
use chrono::NaiveDate;
use log::debug;

/// Resolved filtering window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// No bounds given, everything passes
    All,
    /// Exactly one day
    Day(NaiveDate),
    /// Inclusive range, `start <= end`
    Range(NaiveDate, NaiveDate),
}

impl DateWindow {
    /// Build a window from optional bounds
    ///
    /// A single bound selects that day only. Reversed bounds are swapped.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (None, None) => DateWindow::All,
            (Some(day), None) | (None, Some(day)) => DateWindow::Day(day),
            (Some(start), Some(end)) if start > end => DateWindow::Range(end, start),
            (Some(start), Some(end)) => DateWindow::Range(start, end),
        }
    }

    /// Whether a (possibly unknown) day falls in the window
    ///
    /// Unknown days only pass the unbounded window.
    pub fn contains(&self, day: Option<NaiveDate>) -> bool {
        match (self, day) {
            (DateWindow::All, _) => true,
            (_, None) => false,
            (DateWindow::Day(d), Some(day)) => day == *d,
            (DateWindow::Range(start, end), Some(day)) => *start <= day && day <= *end,
        }
    }
}

/// Keep records whose creation day falls in `[start, end]`
///
/// **Public** - main entry point for date filtering
pub fn filter_by_date(
    records: Vec<LeadRecord>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<LeadRecord> {
    let window = DateWindow::from_bounds(start, end);
    if window == DateWindow::All {
        return records;
    }

    let before = records.len();
    let kept: Vec<LeadRecord> = records
        .into_iter()
        .filter(|record| window.contains(record.created_at))
        .collect();

    debug!("Date filter {:?}: kept {} of {} records", window, kept.len(), before);
    kept
}
