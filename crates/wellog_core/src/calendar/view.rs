//! Calendar screen state: reference month plus selected day.

use crate::calendar::grid::{CalendarGrid, CalendarGridBuilder};
use crate::calendar::selector::DaySelector;
use crate::clock::Clock;
use crate::model::log::Log;
use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;

pub struct CalendarView {
    grid: CalendarGridBuilder,
    selector: DaySelector,
    clock: Arc<dyn Clock>,
}

impl CalendarView {
    /// Starts on the current month with today selected.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let today = clock.today();
        Self {
            grid: CalendarGridBuilder::new(today),
            selector: DaySelector::new(today),
            clock,
        }
    }

    pub fn reference_month(&self) -> NaiveDate {
        self.grid.reference_month()
    }

    pub fn selected(&self) -> NaiveDate {
        self.selector.selected()
    }

    pub fn next_month(&mut self) -> NaiveDate {
        self.grid.next_month()
    }

    pub fn prev_month(&mut self) -> NaiveDate {
        self.grid.prev_month()
    }

    pub fn show_month(&mut self, date: NaiveDate) {
        self.grid.set_reference_month(date);
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selector.select_date(date);
    }

    /// Resets both the reference month and the selection to today.
    pub fn today(&mut self) -> NaiveDate {
        let today = self.clock.today();
        self.grid.set_reference_month(today);
        self.selector.select_date(today);
        debug!("event=calendar_today module=calendar status=ok date={today}");
        today
    }

    pub fn build(&self, logs: &[Log]) -> CalendarGrid {
        self.grid.build(logs, self.clock.today(), self.selector.selected())
    }

    /// Grid for an arbitrary month, keeping the current selection flag.
    pub fn build_for(&self, month: NaiveDate, logs: &[Log]) -> CalendarGrid {
        CalendarGridBuilder::new(month).build(logs, self.clock.today(), self.selector.selected())
    }

    pub fn logs_for_selected(&self, logs: &[Log]) -> Vec<Log> {
        self.selector.logs_for_selected(logs)
    }
}
