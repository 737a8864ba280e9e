//! Month grid construction and month arithmetic.
//!
//! # Invariants
//! - Leading padding equals the weekday index (Sunday = 0) of the 1st.
//! - Trailing padding equals `6 - weekday index` of the last day.
//! - Exactly one day cell per day of the month, in order.
//! - Navigation always lands on the first day of the adjacent month.

use crate::model::day::TypeCounts;
use crate::model::log::Log;
use crate::query::group::group_by_day;
use chrono::{Datelike, Days, Months, NaiveDate};
use log::{debug, warn};

pub const DAYS_PER_WEEK: usize = 7;

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] =
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One in-month day of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub counts: TypeCounts,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_current_month: bool,
}

impl DayCell {
    pub fn has_logs(&self) -> bool {
        !self.counts.is_empty()
    }
}

/// One grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    /// Empty cell aligning weekday columns.
    Padding,
    Day(DayCell),
}

impl CalendarCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            Self::Padding => None,
            Self::Day(cell) => Some(cell),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.as_day().map(|cell| cell.date)
    }

    pub fn is_padding(&self) -> bool {
        matches!(self, Self::Padding)
    }
}

/// Ordered cells for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    month: NaiveDate,
    cells: Vec<CalendarCell>,
}

impl CalendarGrid {
    /// First day of the represented month.
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    /// Heading such as `May 2023`.
    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<CalendarCell> {
        self.cells
    }

    /// Week rows of exactly seven cells.
    pub fn rows(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn day_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(CalendarCell::as_day)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayCell> {
        self.day_cells().find(|cell| cell.date == date)
    }

    pub fn leading_padding(&self) -> usize {
        self.cells.iter().take_while(|cell| cell.is_padding()).count()
    }

    pub fn trailing_padding(&self) -> usize {
        self.cells
            .iter()
            .rev()
            .take_while(|cell| cell.is_padding())
            .count()
    }
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(date.day0())))
        .unwrap_or(date)
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        // Only December of the last representable year has no successor.
        None => 31,
    }
}

/// Last day of the month containing `date`.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first
        .checked_add_days(Days::new(u64::from(days_in_month(first) - 1)))
        .unwrap_or(first)
}

/// First day of the month `delta` months away from the month of `date`.
///
/// Returns `None` outside the representable date range.
pub fn shift_month(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let first = first_of_month(date);
    let months = Months::new(delta.unsigned_abs());
    if delta >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    }
}

/// Builds the grid for the month containing `month`.
///
/// Aggregates are computed over every log in `logs`.
pub fn build_month_grid(
    month: NaiveDate,
    logs: &[Log],
    today: NaiveDate,
    selected: NaiveDate,
) -> CalendarGrid {
    let first = first_of_month(month);
    let last = last_of_month(first);
    let leading = first.weekday().num_days_from_sunday() as usize;
    let trailing = 6 - last.weekday().num_days_from_sunday() as usize;
    let day_count = days_in_month(first) as usize;

    let buckets = group_by_day(logs.iter().filter(|log| (first..=last).contains(&log.date())));

    let mut cells = Vec::with_capacity(leading + day_count + trailing);
    cells.extend(std::iter::repeat(CalendarCell::Padding).take(leading));
    let days = (0..day_count as u64)
        .filter_map(|offset| first.checked_add_days(Days::new(offset)));
    cells.extend(days.map(|date| {
        CalendarCell::Day(DayCell {
            date,
            counts: buckets
                .get(&date)
                .map(|bucket| bucket.counts)
                .unwrap_or_default(),
            is_today: date == today,
            is_selected: date == selected,
            is_current_month: true,
        })
    }));
    cells.extend(std::iter::repeat(CalendarCell::Padding).take(trailing));

    debug!(
        "event=calendar_build module=calendar status=ok month={} cells={} active_days={}",
        first.format("%Y-%m"),
        cells.len(),
        buckets.len()
    );

    CalendarGrid { month: first, cells }
}

/// Reference-month state with calendar-correct navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarGridBuilder {
    reference_month: NaiveDate,
}

impl CalendarGridBuilder {
    /// Starts at the month containing `reference`.
    pub fn new(reference: NaiveDate) -> Self {
        Self {
            reference_month: first_of_month(reference),
        }
    }

    /// First day of the current reference month.
    pub fn reference_month(&self) -> NaiveDate {
        self.reference_month
    }

    pub fn set_reference_month(&mut self, date: NaiveDate) {
        self.reference_month = first_of_month(date);
    }

    pub fn next_month(&mut self) -> NaiveDate {
        self.step(1)
    }

    pub fn prev_month(&mut self) -> NaiveDate {
        self.step(-1)
    }

    pub fn build(&self, logs: &[Log], today: NaiveDate, selected: NaiveDate) -> CalendarGrid {
        build_month_grid(self.reference_month, logs, today, selected)
    }

    fn step(&mut self, delta: i32) -> NaiveDate {
        match shift_month(self.reference_month, delta) {
            Some(month) => self.reference_month = month,
            None => warn!(
                "event=calendar_navigate module=calendar status=clamped month={} delta={delta}",
                self.reference_month.format("%Y-%m")
            ),
        }
        self.reference_month
    }
}

#[cfg(test)]
mod tests {
    use super::{days_in_month, first_of_month, last_of_month, shift_month};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_bounds_handle_leap_years() {
        assert_eq!(days_in_month(date(2024, 2, 10)), 29);
        assert_eq!(days_in_month(date(2023, 2, 10)), 28);
        assert_eq!(days_in_month(date(1900, 2, 1)), 28);
        assert_eq!(last_of_month(date(2023, 4, 30)), date(2023, 4, 30));
        assert_eq!(first_of_month(date(2023, 12, 31)), date(2023, 12, 1));
    }

    #[test]
    fn shift_month_crosses_year_boundaries() {
        assert_eq!(shift_month(date(2023, 12, 31), 1), Some(date(2024, 1, 1)));
        assert_eq!(shift_month(date(2024, 1, 31), -1), Some(date(2023, 12, 1)));
        assert_eq!(shift_month(date(2024, 1, 31), 13), Some(date(2025, 2, 1)));
    }

    #[test]
    fn shift_month_stops_at_representable_range() {
        assert_eq!(shift_month(NaiveDate::MAX, 1), None);
        assert_eq!(days_in_month(NaiveDate::MAX), 31);
        assert_eq!(last_of_month(NaiveDate::MAX), NaiveDate::MAX);
    }
}
