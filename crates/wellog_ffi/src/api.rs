//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, screen-level functions to Dart via FRB.
//! - Own the single process-wide wellness session.
//! - Gate every log operation on the host-provided authentication flag.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Dates cross the boundary as `YYYY-MM-DD`, timestamps as local ISO strings.
//! - Failures are reported through `ok = false` envelopes, never by panicking.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};
use log::warn;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};
use uuid::Uuid;
use wellog_core::{
    core_version as core_version_inner, default_log_level as default_log_level_inner,
    init_logging as init_logging_inner, ping as ping_inner, CalendarCell, CalendarGrid,
    DailyGoals, DayBucket, ListQuery, Log, LogDraft, LogType, LogValue, RecentLog, TypeCounts,
    TypeProgress, TypeTab, WellnessService, WEEKDAY_LABELS,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const TIME_LABEL_FORMAT: &str = "%-I:%M %p";
const NOT_AUTHENTICATED: &str = "not authenticated";

static SESSION: OnceLock<Mutex<WellnessService>> = OnceLock::new();
static AUTHENTICATED: AtomicBool = AtomicBool::new(false);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Default log level for the current build mode (`debug` or `info`).
#[flutter_rust_bridge::frb(sync)]
pub fn default_log_level() -> String {
    default_log_level_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Idempotent for the same `level + log_dir`; conflicting reconfiguration fails.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Records whether a user is currently signed in.
///
/// The flag is owned by the host's auth layer; core never inspects credentials.
#[flutter_rust_bridge::frb(sync)]
pub fn session_set_authenticated(authenticated: bool) {
    AUTHENTICATED.store(authenticated, Ordering::SeqCst);
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_is_authenticated() -> bool {
    AUTHENTICATED.load(Ordering::SeqCst)
}

/// Per-type counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogCounts {
    pub water: u32,
    pub exercise: u32,
    pub sleep: u32,
    pub mood: u32,
}

/// One log rendered for display.
#[derive(Debug, Clone, PartialEq)]
pub struct LogItem {
    pub log_id: String,
    /// `water|exercise|sleep|mood`.
    pub kind: String,
    /// Raw value text (`8`, `7.5`, `Good`).
    pub value: String,
    pub unit: Option<String>,
    /// Value with unit (`8 glasses`).
    pub display_value: String,
    /// Local ISO timestamp `YYYY-MM-DDTHH:MM:SS`.
    pub timestamp: String,
    /// Clock label such as `6:30 PM`.
    pub time_label: String,
    pub notes: Option<String>,
}

/// Logs of one day for the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date: String,
    pub counts: LogCounts,
    pub items: Vec<LogItem>,
}

/// Generic action envelope for create/delete flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogActionResponse {
    pub ok: bool,
    pub log_id: Option<String>,
    pub message: String,
}

impl LogActionResponse {
    fn success(message: impl Into<String>, log_id: Option<String>) -> Self {
        Self {
            ok: true,
            log_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            log_id: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogListResponse {
    pub ok: bool,
    /// Day groups, most recent day first.
    pub days: Vec<DayGroup>,
    pub message: String,
}

/// One calendar grid position; padding cells have no date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCellItem {
    pub date: Option<String>,
    pub day_of_month: Option<u32>,
    pub counts: LogCounts,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_current_month: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarResponse {
    pub ok: bool,
    /// Heading such as `May 2023`.
    pub title: String,
    /// First day of the shown month.
    pub month: String,
    pub selected_date: String,
    pub weekday_labels: Vec<String>,
    /// Sunday-first cells; length is a multiple of 7.
    pub cells: Vec<CalendarCellItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayDetailResponse {
    pub ok: bool,
    pub date: String,
    /// Oldest first.
    pub items: Vec<LogItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressItem {
    pub kind: String,
    pub achieved: f64,
    pub target: Option<f64>,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentItem {
    pub item: LogItem,
    /// Relative label such as `2 hours ago`.
    pub relative: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardResponse {
    pub ok: bool,
    pub date: String,
    pub progress: Vec<ProgressItem>,
    pub recent: Vec<RecentItem>,
    pub message: String,
}

/// Creates a log from the add-log form.
///
/// Input semantics:
/// - `kind`: `water|exercise|sleep|mood` (case-insensitive).
/// - `value`: decimal amount, or a mood label for `mood`.
/// - `timestamp_epoch_ms`: optional, interpreted in local time; defaults to now.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics; validation errors come back as `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn log_create(
    kind: String,
    value: String,
    notes: Option<String>,
    timestamp_epoch_ms: Option<i64>,
) -> LogActionResponse {
    let draft = match build_draft(&kind, &value, notes, timestamp_epoch_ms) {
        Ok(draft) => draft,
        Err(err) => return LogActionResponse::failure(format!("log_create failed: {err}")),
    };
    match with_session(|service| service.create_log(draft)) {
        Ok(Ok(log)) => LogActionResponse::success("Log added.", Some(log.id().to_string())),
        Ok(Err(err)) => LogActionResponse::failure(format!("log_create failed: {err}")),
        Err(err) => LogActionResponse::failure(format!("log_create failed: {err}")),
    }
}

/// Deletes a log by id; unknown ids succeed as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn log_delete(log_id: String) -> LogActionResponse {
    let id = match Uuid::parse_str(log_id.trim()) {
        Ok(id) => id,
        Err(_) => {
            return LogActionResponse::failure(format!(
                "log_delete failed: invalid log id `{}`",
                log_id.trim()
            ))
        }
    };
    match with_session(|service| service.delete_log(id)) {
        Ok(true) => LogActionResponse::success("Log deleted.", Some(id.to_string())),
        Ok(false) => LogActionResponse::success("Log not found; nothing to delete.", None),
        Err(err) => LogActionResponse::failure(format!("log_delete failed: {err}")),
    }
}

/// List view: filtered logs grouped by day, most recent day first.
#[flutter_rust_bridge::frb(sync)]
pub fn logs_list(type_tab: String, search_text: String) -> LogListResponse {
    let failure = |message: String| LogListResponse {
        ok: false,
        days: Vec::new(),
        message,
    };
    let tab = match type_tab.parse::<TypeTab>() {
        Ok(tab) => tab,
        Err(err) => return failure(format!("logs_list failed: {err}")),
    };
    let query = ListQuery::new(tab, search_text.trim());
    match with_session(|service| service.list_view(&query)) {
        Ok(buckets) => {
            let days: Vec<DayGroup> = buckets.iter().map(to_day_group).collect();
            let message = if days.is_empty() {
                "No logs found.".to_string()
            } else {
                format!("Found logs on {} day(s).", days.len())
            };
            LogListResponse {
                ok: true,
                days,
                message,
            }
        }
        Err(err) => failure(format!("logs_list failed: {err}")),
    }
}

/// Calendar grid for the current reference month.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_current() -> CalendarResponse {
    calendar_response("calendar_current", |service| service.calendar())
}

/// Calendar grid for the month containing `date`, without moving navigation.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_month(date: String) -> CalendarResponse {
    match parse_date(&date) {
        Ok(date) => calendar_response("calendar_month", |service| service.calendar_for(date)),
        Err(err) => calendar_failure(format!("calendar_month failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn calendar_next_month() -> CalendarResponse {
    calendar_response("calendar_next_month", |service| {
        service.next_month();
        service.calendar()
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn calendar_prev_month() -> CalendarResponse {
    calendar_response("calendar_prev_month", |service| {
        service.prev_month();
        service.calendar()
    })
}

/// Jumps to the current month and selects today.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_today() -> CalendarResponse {
    calendar_response("calendar_today", |service| {
        service.go_to_today();
        service.calendar()
    })
}

/// Selects `date` and returns the refreshed grid of the current month.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_select_date(date: String) -> CalendarResponse {
    match parse_date(&date) {
        Ok(date) => calendar_response("calendar_select_date", |service| {
            service.select_date(date);
            service.calendar()
        }),
        Err(err) => calendar_failure(format!("calendar_select_date failed: {err}")),
    }
}

/// Logs on `date`, oldest first, from the unfiltered collection.
#[flutter_rust_bridge::frb(sync)]
pub fn day_detail(date: String) -> DayDetailResponse {
    let failure = |message: String| DayDetailResponse {
        ok: false,
        date: date.trim().to_string(),
        items: Vec::new(),
        message,
    };
    let parsed = match parse_date(&date) {
        Ok(parsed) => parsed,
        Err(err) => return failure(format!("day_detail failed: {err}")),
    };
    match with_session(|service| service.day_detail(parsed)) {
        Ok(logs) => {
            let items: Vec<LogItem> = logs.iter().map(to_log_item).collect();
            let message = if items.is_empty() {
                "No logs for this day.".to_string()
            } else {
                format!("{} log(s).", items.len())
            };
            DayDetailResponse {
                ok: true,
                date: parsed.format(DATE_FORMAT).to_string(),
                items,
                message,
            }
        }
        Err(err) => failure(format!("day_detail failed: {err}")),
    }
}

/// Today's goal progress and the most recent logs.
///
/// `recent_limit`: `None`/`0` uses the default (4), values above 20 are capped.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_summary(recent_limit: Option<u32>) -> DashboardResponse {
    match with_session(|service| service.dashboard(recent_limit)) {
        Ok(summary) => DashboardResponse {
            ok: true,
            date: summary.date.format(DATE_FORMAT).to_string(),
            progress: summary.progress.iter().map(to_progress_item).collect(),
            recent: summary.recent.iter().map(to_recent_item).collect(),
            message: String::new(),
        },
        Err(err) => DashboardResponse {
            ok: false,
            date: String::new(),
            progress: Vec::new(),
            recent: Vec::new(),
            message: format!("dashboard_summary failed: {err}"),
        },
    }
}

/// Replaces the daily goals from a JSON object (`{"water": 8, ...}`).
///
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn set_daily_goals(goals_json: String) -> String {
    let goals = match DailyGoals::from_json(&goals_json) {
        Ok(goals) => goals,
        Err(err) => return format!("set_daily_goals failed: {err}"),
    };
    match with_session(|service| service.set_goals(goals)) {
        Ok(Ok(())) => String::new(),
        Ok(Err(err)) => format!("set_daily_goals failed: {err}"),
        Err(err) => format!("set_daily_goals failed: {err}"),
    }
}

fn check_gate(authenticated: bool) -> Result<(), String> {
    if authenticated {
        Ok(())
    } else {
        Err(NOT_AUTHENTICATED.to_string())
    }
}

fn with_session<T>(f: impl FnOnce(&mut WellnessService) -> T) -> Result<T, String> {
    check_gate(session_is_authenticated())?;
    let mut guard = lock_session();
    Ok(f(&mut guard))
}

fn lock_session() -> MutexGuard<'static, WellnessService> {
    SESSION
        .get_or_init(|| Mutex::new(WellnessService::default()))
        .lock()
        .unwrap_or_else(|poisoned| {
            warn!("event=session_lock module=ffi status=recovered reason=poisoned");
            poisoned.into_inner()
        })
}

fn build_draft(
    kind: &str,
    value: &str,
    notes: Option<String>,
    timestamp_epoch_ms: Option<i64>,
) -> Result<LogDraft, String> {
    let kind = kind.parse::<LogType>().map_err(|err| err.to_string())?;
    let value = LogValue::parse_for(kind, value).map_err(|err| err.to_string())?;
    let timestamp = match timestamp_epoch_ms {
        Some(epoch_ms) => Some(local_from_epoch_ms(epoch_ms)?),
        None => None,
    };
    Ok(LogDraft {
        kind: Some(kind),
        value: Some(value),
        notes: notes.map(|text| text.trim().to_string()),
        timestamp,
    })
}

fn local_from_epoch_ms(epoch_ms: i64) -> Result<NaiveDateTime, String> {
    Local
        .timestamp_millis_opt(epoch_ms)
        .single()
        .map(|datetime| datetime.naive_local())
        .ok_or_else(|| format!("invalid timestamp `{epoch_ms}`"))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date `{}`; expected YYYY-MM-DD", raw.trim()))
}

fn calendar_response(
    operation: &str,
    f: impl FnOnce(&mut WellnessService) -> CalendarGrid,
) -> CalendarResponse {
    match with_session(|service| {
        let grid = f(service);
        (grid, service.selected_date())
    }) {
        Ok((grid, selected)) => to_calendar_response(&grid, selected),
        Err(err) => calendar_failure(format!("{operation} failed: {err}")),
    }
}

fn calendar_failure(message: String) -> CalendarResponse {
    CalendarResponse {
        ok: false,
        title: String::new(),
        month: String::new(),
        selected_date: String::new(),
        weekday_labels: Vec::new(),
        cells: Vec::new(),
        message,
    }
}

fn to_calendar_response(grid: &CalendarGrid, selected: NaiveDate) -> CalendarResponse {
    CalendarResponse {
        ok: true,
        title: grid.title(),
        month: grid.month().format(DATE_FORMAT).to_string(),
        selected_date: selected.format(DATE_FORMAT).to_string(),
        weekday_labels: WEEKDAY_LABELS.iter().map(|label| label.to_string()).collect(),
        cells: grid.cells().iter().map(to_calendar_cell_item).collect(),
        message: String::new(),
    }
}

fn to_calendar_cell_item(cell: &CalendarCell) -> CalendarCellItem {
    match cell {
        CalendarCell::Padding => CalendarCellItem {
            date: None,
            day_of_month: None,
            counts: LogCounts::default(),
            is_today: false,
            is_selected: false,
            is_current_month: false,
        },
        CalendarCell::Day(day) => CalendarCellItem {
            date: Some(day.date.format(DATE_FORMAT).to_string()),
            day_of_month: Some(day.date.day()),
            counts: to_log_counts(&day.counts),
            is_today: day.is_today,
            is_selected: day.is_selected,
            is_current_month: day.is_current_month,
        },
    }
}

fn to_day_group(bucket: &DayBucket) -> DayGroup {
    DayGroup {
        date: bucket.key(),
        counts: to_log_counts(&bucket.counts),
        items: bucket.logs.iter().map(to_log_item).collect(),
    }
}

fn to_log_counts(counts: &TypeCounts) -> LogCounts {
    LogCounts {
        water: counts.water,
        exercise: counts.exercise,
        sleep: counts.sleep,
        mood: counts.mood,
    }
}

fn to_log_item(log: &Log) -> LogItem {
    LogItem {
        log_id: log.id().to_string(),
        kind: log.kind().as_str().to_string(),
        value: log.value().render(),
        unit: log.unit().map(str::to_string),
        display_value: log.display_value(),
        timestamp: log.timestamp().format(TIMESTAMP_FORMAT).to_string(),
        time_label: log.timestamp().format(TIME_LABEL_FORMAT).to_string(),
        notes: log.notes().map(str::to_string),
    }
}

fn to_progress_item(progress: &TypeProgress) -> ProgressItem {
    ProgressItem {
        kind: progress.kind.as_str().to_string(),
        achieved: progress.achieved,
        target: progress.target,
        percent: progress.percent(),
    }
}

fn to_recent_item(recent: &RecentLog) -> RecentItem {
    RecentItem {
        item: to_log_item(&recent.log),
        relative: recent.relative.clone(),
    }
}
