//! Integration tests for common schedule workflows.
//!
//! These tests go through the facade crate the way applications do.

use chrono::NaiveDate;
use chronos::prelude::*;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Schedule Query Tests
// =============================================================================

#[test]
fn test_nightly_job() {
    init_tracing();

    let nightly = Chronos::new(
        &[FieldSpec::Any, FieldSpec::Any, FieldSpec::Any],
        &[FieldSpec::at(2), FieldSpec::at(30), FieldSpec::at(0)],
        Mode::Month,
    )
    .unwrap();

    let from = at(2024, 12, 31, 3, 0, 0);
    assert_eq!(nightly.next(Some(from), 1).unwrap(), at(2025, 1, 1, 2, 30, 0));
    assert_eq!(nightly.next(Some(from), 3).unwrap(), at(2025, 1, 3, 2, 30, 0));
    assert_eq!(nightly.prev(Some(from), 1).unwrap(), at(2024, 12, 31, 2, 30, 0));
    assert!(nightly.contains(Some(at(2024, 6, 1, 2, 30, 0))));
    assert!(!nightly.contains(Some(at(2024, 6, 1, 2, 30, 1))));
}

#[test]
fn test_missed_runs_since_last_check() {
    // Every 10 minutes
    let job = Chronos::new(
        &[FieldSpec::Any, FieldSpec::Any, FieldSpec::Any],
        &[FieldSpec::Any, FieldSpec::stepped(0, 59, 10), FieldSpec::at(0)],
        Mode::Month,
    )
    .unwrap();

    let last_check = at(2024, 3, 10, 23, 35, 0);
    let now = at(2024, 3, 11, 0, 5, 0);
    let missed: Vec<_> = job
        .upcoming(Some(last_check), 10)
        .unwrap()
        .into_iter()
        .take_while(|t| *t <= now)
        .collect();
    assert_eq!(
        missed,
        vec![
            at(2024, 3, 10, 23, 40, 0),
            at(2024, 3, 10, 23, 50, 0),
            at(2024, 3, 11, 0, 0, 0),
        ]
    );
}

#[test]
fn test_tuesdays_by_week_row() {
    // September 2024 opens on a Sunday, so its first row has no Tuesday
    let tuesdays = Chronos::new(
        &[FieldSpec::Any, FieldSpec::Any, FieldSpec::Any, FieldSpec::at(2)],
        &[FieldSpec::at(10), FieldSpec::at(0), FieldSpec::at(0)],
        Mode::MonthWeek,
    )
    .unwrap();

    let firsts = tuesdays.upcoming(Some(at(2024, 9, 1, 0, 0, 0)), 3).unwrap();
    assert_eq!(
        firsts,
        vec![
            at(2024, 9, 3, 10, 0, 0),
            at(2024, 9, 10, 10, 0, 0),
            at(2024, 9, 17, 10, 0, 0),
        ]
    );
}

// =============================================================================
// Span Tests
// =============================================================================

#[test]
fn test_maintenance_window() {
    // Saturday 22:00 until Sunday 04:00
    let weekly = |weekday, hour| {
        Chronos::new(
            &[FieldSpec::Any, FieldSpec::Any, FieldSpec::at(weekday)],
            &[FieldSpec::at(hour), FieldSpec::at(0), FieldSpec::at(0)],
            Mode::Week,
        )
        .unwrap()
    };
    let window = Span::new(weekly(6, 22), weekly(7, 4));

    // Saturday 2024-06-15, Sunday 2024-06-16
    assert!(!window.contains(Some(at(2024, 6, 15, 21, 59, 59))));
    assert!(window.contains(Some(at(2024, 6, 15, 22, 0, 0))));
    assert!(window.contains(Some(at(2024, 6, 16, 3, 0, 0))));
    assert!(!window.contains(Some(at(2024, 6, 16, 4, 0, 0))));
    assert!(!window.contains(Some(at(2024, 6, 19, 12, 0, 0))));
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[cfg(feature = "config")]
#[test]
fn test_registry_from_toml() {
    use chronos::chronos_config::{FileFormat, ScheduleLoader};

    let toml = r#"
        [schedules.report]
        mode = "month_week"
        week = { at = -1 }
        weekday = { at = 5 }
        hour = { at = 16 }
        minute = { at = 0 }
        second = { at = 0 }
    "#;
    let registry: ScheduleRegistry = ScheduleLoader::new(FileFormat::Toml)
        .parse(toml)
        .unwrap()
        .build()
        .unwrap();

    // Last row of May 2024 runs Mon 27 to Fri 31
    let report = registry.require("report").unwrap();
    assert_eq!(
        report.next(Some(at(2024, 5, 1, 0, 0, 0)), 1).unwrap(),
        at(2024, 5, 31, 16, 0, 0)
    );
}
