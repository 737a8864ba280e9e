//! Selected-day state.
//!
//! # Invariants
//! - Any valid calendar date may be selected, inside the visible month or not.
//! - Logs for the selection come from the unfiltered collection, oldest first.

use crate::model::log::Log;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySelector {
    selected: NaiveDate,
}

impl DaySelector {
    pub fn new(selected: NaiveDate) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected = date;
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selected == date
    }

    /// Logs on the selected date in chronological order.
    pub fn logs_for_selected(&self, logs: &[Log]) -> Vec<Log> {
        logs_on(logs, self.selected)
    }
}

/// Logs whose timestamp falls on `date`, sorted by timestamp.
///
/// The sort is stable, so equal timestamps keep their input order.
pub fn logs_on(logs: &[Log], date: NaiveDate) -> Vec<Log> {
    let mut matching: Vec<Log> = logs
        .iter()
        .filter(|log| log.date() == date)
        .cloned()
        .collect();
    matching.sort_by_key(Log::timestamp);
    matching
}
