use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use wellog_core::{
    logs_on, CalendarView, DaySelector, FixedClock, Log, LogDraft, LogStore, LogType, Mood,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn logs_for_may() -> Vec<Log> {
    let mut store = LogStore::new(Arc::new(FixedClock::at(at(2023, 5, 20, 9, 0))));
    for draft in [
        LogDraft::mood(Mood::Good).at(at(2023, 5, 15, 20, 0)),
        LogDraft::amount(LogType::Water, 8.0).at(at(2023, 5, 15, 10, 30)),
        LogDraft::amount(LogType::Sleep, 7.5).at(at(2023, 5, 15, 6, 30)),
        LogDraft::amount(LogType::Exercise, 45.0).at(at(2023, 5, 15, 18, 0)),
        LogDraft::amount(LogType::Sleep, 6.0).at(at(2023, 5, 14, 6, 0)),
    ] {
        store.add(draft).unwrap();
    }
    store.list()
}

#[test]
fn selector_returns_selected_day_in_chronological_order() {
    let logs = logs_for_may();
    let mut selector = DaySelector::new(date(2023, 5, 1));
    selector.select_date(date(2023, 5, 15));

    let times: Vec<NaiveDateTime> = selector
        .logs_for_selected(&logs)
        .iter()
        .map(Log::timestamp)
        .collect();
    assert_eq!(
        times,
        vec![
            at(2023, 5, 15, 6, 30),
            at(2023, 5, 15, 10, 30),
            at(2023, 5, 15, 18, 0),
            at(2023, 5, 15, 20, 0),
        ]
    );
}

#[test]
fn selecting_a_day_without_logs_is_empty_not_an_error() {
    let logs = logs_for_may();
    let mut selector = DaySelector::new(date(2023, 5, 15));
    selector.select_date(date(1999, 12, 31));
    assert!(selector.logs_for_selected(&logs).is_empty());
    assert!(selector.is_selected(date(1999, 12, 31)));
}

#[test]
fn equal_timestamps_keep_input_order() {
    let mut store = LogStore::new(Arc::new(FixedClock::at(at(2023, 5, 15, 9, 0))));
    let first = store
        .add(LogDraft::amount(LogType::Water, 1.0).at(at(2023, 5, 15, 9, 0)))
        .unwrap();
    let second = store
        .add(LogDraft::amount(LogType::Water, 2.0).at(at(2023, 5, 15, 9, 0)))
        .unwrap();
    let ordered = logs_on(&store.list(), date(2023, 5, 15));
    assert_eq!(ordered, vec![first, second]);
}

#[test]
fn view_starts_on_today_and_flags_selection() {
    let clock = Arc::new(FixedClock::at(at(2023, 5, 20, 9, 0)));
    let mut view = CalendarView::new(clock);
    assert_eq!(view.reference_month(), date(2023, 5, 1));
    assert_eq!(view.selected(), date(2023, 5, 20));

    view.select_date(date(2023, 5, 15));
    let grid = view.build(&logs_for_may());
    let selected: Vec<NaiveDate> = grid
        .day_cells()
        .filter(|cell| cell.is_selected)
        .map(|cell| cell.date)
        .collect();
    assert_eq!(selected, vec![date(2023, 5, 15)]);
    let today: Vec<NaiveDate> = grid
        .day_cells()
        .filter(|cell| cell.is_today)
        .map(|cell| cell.date)
        .collect();
    assert_eq!(today, vec![date(2023, 5, 20)]);
    assert_eq!(view.logs_for_selected(&logs_for_may()).len(), 4);
}

#[test]
fn today_resets_month_and_selection_to_clock() {
    let clock = Arc::new(FixedClock::at(at(2023, 5, 20, 9, 0)));
    let mut view = CalendarView::new(clock.clone());

    view.prev_month();
    view.prev_month();
    view.select_date(date(2023, 3, 3));
    assert_eq!(view.reference_month(), date(2023, 3, 1));

    clock.advance(Duration::days(20));
    assert_eq!(view.today(), date(2023, 6, 9));
    assert_eq!(view.reference_month(), date(2023, 6, 1));
    assert_eq!(view.selected(), date(2023, 6, 9));
}

#[test]
fn grid_for_other_month_has_no_today_flag() {
    let clock = Arc::new(FixedClock::at(at(2023, 5, 20, 9, 0)));
    let view = CalendarView::new(clock);
    let grid = view.build_for(date(2023, 4, 1), &logs_for_may());
    assert_eq!(grid.title(), "April 2023");
    assert!(grid.day_cells().all(|cell| !cell.is_today && !cell.is_selected));
    assert!(grid.day_cells().all(|cell| !cell.has_logs()));
}
