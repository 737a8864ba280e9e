//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `wellog_core` linkage.
//! - Print a deterministic sample month so grid layout can be eyeballed.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::error::Error;
use std::sync::Arc;
use wellog_core::{
    CalendarCell, CalendarGrid, FixedClock, LogDraft, LogType, Mood, WellnessService,
    WEEKDAY_LABELS,
};

fn main() -> Result<(), Box<dyn Error>> {
    println!("wellog_core ping={}", wellog_core::ping());
    println!("wellog_core version={}", wellog_core::core_version());

    let service = sample_service()?;
    println!();
    print!("{}", render_grid(&service.calendar()));
    for log in service.selected_day_logs() {
        println!(
            "{} {} {}",
            log.timestamp().format("%H:%M"),
            log.kind(),
            log.display_value()
        );
    }
    Ok(())
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> Result<NaiveDateTime, String> {
    date.and_hms_opt(hour, minute, 0)
        .ok_or_else(|| format!("invalid time {hour}:{minute}"))
}

fn sample_service() -> Result<WellnessService, Box<dyn Error>> {
    let may_14 = NaiveDate::from_ymd_opt(2023, 5, 14).ok_or("invalid sample date")?;
    let may_15 = NaiveDate::from_ymd_opt(2023, 5, 15).ok_or("invalid sample date")?;

    let mut service = WellnessService::new(Arc::new(FixedClock::at(at(may_15, 21, 0)?)));
    let drafts = [
        LogDraft::amount(LogType::Sleep, 6.0).at(at(may_14, 7, 0)?),
        LogDraft::amount(LogType::Water, 8.0).at(at(may_15, 9, 30)?),
        LogDraft::amount(LogType::Exercise, 45.0).at(at(may_15, 18, 0)?),
        LogDraft::mood(Mood::Good).at(at(may_15, 20, 15)?),
    ];
    for draft in drafts {
        service.create_log(draft)?;
    }
    Ok(service)
}

/// Renders a grid as text: `*` marks days with logs, brackets mark the selection.
fn render_grid(grid: &CalendarGrid) -> String {
    let mut out = format!("{:^35}\n", grid.title());
    for label in WEEKDAY_LABELS {
        out.push_str(&format!("{label:^5}"));
    }
    out.push('\n');
    for row in grid.rows() {
        for cell in row {
            let text = match cell {
                CalendarCell::Padding => String::new(),
                CalendarCell::Day(day) => {
                    let mark = if day.has_logs() { "*" } else { "" };
                    let number = format!("{}{mark}", day.date.day());
                    if day.is_selected {
                        format!("[{number}]")
                    } else {
                        number
                    }
                }
            };
            out.push_str(&format!("{text:^5}"));
        }
        out.push('\n');
    }
    out
}
