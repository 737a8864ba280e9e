//! Session-level wellness service.
//!
//! # Responsibility
//! - Own the session's `LogStore` and calendar state.
//! - Answer creation, deletion and read queries for the presentation layer.
//!
//! # Invariants
//! - Every read view is recomputed from the store on each call.
//! - Calendar, day-detail and dashboard views ignore the list-view filter.
//! - Read paths never fail.

use crate::calendar::grid::CalendarGrid;
use crate::calendar::selector::logs_on;
use crate::calendar::view::CalendarView;
use crate::clock::{Clock, SystemClock};
use crate::model::day::DayBucket;
use crate::model::log::{InvalidLogError, Log, LogDraft, LogId};
use crate::query::filter::{LogFilter, TypeTab};
use crate::query::group::buckets_newest_first;
use crate::repo::log_store::{LogStore, RepoResult};
use crate::service::dashboard::{
    daily_progress, normalize_recent_limit, recent_logs, DailyGoals, DashboardSummary, GoalsError,
};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;

/// List-view query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub type_tab: TypeTab,
    pub search_text: String,
}

impl ListQuery {
    pub fn new(type_tab: TypeTab, search_text: impl Into<String>) -> Self {
        Self {
            type_tab,
            search_text: search_text.into(),
        }
    }
}

/// Facade over one session's logs, calendar state and goals.
pub struct WellnessService {
    store: LogStore,
    calendar: CalendarView,
    goals: DailyGoals,
    clock: Arc<dyn Clock>,
}

impl Default for WellnessService {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl WellnessService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: LogStore::new(Arc::clone(&clock)),
            calendar: CalendarView::new(Arc::clone(&clock)),
            goals: DailyGoals::default(),
            clock,
        }
    }

    /// Creates a log from a (possibly partial) creation request.
    pub fn create_log(&mut self, draft: LogDraft) -> Result<Log, InvalidLogError> {
        self.store.add(draft).inspect_err(|err| {
            warn!("event=log_create module=service status=rejected reason=\"{err}\"");
        })
    }

    /// Inserts a complete log, keeping its id.
    pub fn import_log(&mut self, log: Log) -> RepoResult<LogId> {
        self.store.insert(log)
    }

    /// Deletes by id; unknown ids are a no-op.
    pub fn delete_log(&mut self, id: LogId) -> bool {
        self.store.remove(id)
    }

    pub fn get_log(&self, id: LogId) -> Option<Log> {
        self.store.get(id)
    }

    pub fn logs(&self) -> Vec<Log> {
        self.store.list()
    }

    /// Filtered logs grouped by day, most recent day first.
    pub fn list_view(&self, query: &ListQuery) -> Vec<DayBucket> {
        let filter = LogFilter::new(query.type_tab, &query.search_text);
        let filtered = filter.apply(self.store.as_slice());
        let buckets = buckets_newest_first(&filtered);
        debug!(
            "event=list_view module=service status=ok tab={} matched={} days={}",
            query.type_tab,
            filtered.len(),
            buckets.len()
        );
        buckets
    }

    /// Grid for the current reference month.
    pub fn calendar(&self) -> CalendarGrid {
        self.calendar.build(self.store.as_slice())
    }

    /// Grid for the month containing `month`, without moving navigation state.
    pub fn calendar_for(&self, month: NaiveDate) -> CalendarGrid {
        self.calendar.build_for(month, self.store.as_slice())
    }

    pub fn reference_month(&self) -> NaiveDate {
        self.calendar.reference_month()
    }

    pub fn next_month(&mut self) -> NaiveDate {
        self.calendar.next_month()
    }

    pub fn prev_month(&mut self) -> NaiveDate {
        self.calendar.prev_month()
    }

    pub fn show_month(&mut self, date: NaiveDate) {
        self.calendar.show_month(date);
    }

    /// Jumps to the current month and selects today.
    pub fn go_to_today(&mut self) -> NaiveDate {
        self.calendar.today()
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.calendar.select_date(date);
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.calendar.selected()
    }

    /// Logs on the selected date, oldest first.
    pub fn selected_day_logs(&self) -> Vec<Log> {
        self.calendar.logs_for_selected(self.store.as_slice())
    }

    /// Selected date together with its logs.
    pub fn selected_day(&self) -> (NaiveDate, Vec<Log>) {
        (self.selected_date(), self.selected_day_logs())
    }

    /// Logs on `date`, oldest first.
    pub fn day_detail(&self, date: NaiveDate) -> Vec<Log> {
        logs_on(self.store.as_slice(), date)
    }

    /// Today's goal progress plus the most recent logs.
    pub fn dashboard(&self, recent_limit: Option<u32>) -> DashboardSummary {
        let now = self.clock.now();
        let logs = self.store.as_slice();
        DashboardSummary {
            date: now.date(),
            progress: daily_progress(logs, now.date(), &self.goals),
            recent: recent_logs(logs, now, normalize_recent_limit(recent_limit)),
        }
    }

    pub fn goals(&self) -> DailyGoals {
        self.goals
    }

    pub fn set_goals(&mut self, goals: DailyGoals) -> Result<(), GoalsError> {
        goals.validate()?;
        self.goals = goals;
        info!(
            "event=goals_update module=service status=ok water={} exercise={} sleep={}",
            goals.water, goals.exercise, goals.sleep
        );
        Ok(())
    }
}
