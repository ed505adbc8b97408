//! Integration tests for chronos-core

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use chronos_core::*;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn midnight() -> Vec<FieldSpec> {
    vec![FieldSpec::at(0), FieldSpec::at(0), FieldSpec::at(0)]
}

#[test]
fn test_half_past_every_hour() {
    let chronos = Chronos::new(
        &[FieldSpec::Any, FieldSpec::Any, FieldSpec::Any],
        &[FieldSpec::Any, FieldSpec::at(30), FieldSpec::at(0)],
        Mode::Month,
    )
    .unwrap();

    assert_eq!(
        chronos.next(Some(at(2023, 6, 1, 10, 15, 0)), 1).unwrap(),
        at(2023, 6, 1, 10, 30, 0)
    );
    assert_eq!(
        chronos.next(Some(at(2023, 6, 1, 10, 30, 0)), 1).unwrap(),
        at(2023, 6, 1, 11, 30, 0)
    );
}

#[test]
fn test_last_day_of_month() {
    let chronos = Chronos::new(
        &[FieldSpec::Any, FieldSpec::Any, FieldSpec::at(-1)],
        &midnight(),
        Mode::Month,
    )
    .unwrap();

    let upcoming = chronos.upcoming(Some(at(2023, 12, 31, 0, 0, 0)), 4).unwrap();
    assert_eq!(
        upcoming,
        vec![
            at(2024, 1, 31, 0, 0, 0),
            at(2024, 2, 29, 0, 0, 0),
            at(2024, 3, 31, 0, 0, 0),
            at(2024, 4, 30, 0, 0, 0),
        ]
    );
    assert_eq!(
        chronos.prev(Some(at(2023, 3, 15, 0, 0, 0)), 1).unwrap(),
        at(2023, 2, 28, 0, 0, 0)
    );
}

#[test]
fn test_leap_day() {
    let chronos = Chronos::new(
        &[FieldSpec::Any, FieldSpec::at(2), FieldSpec::at(29)],
        &[FieldSpec::at(12), FieldSpec::at(0), FieldSpec::at(0)],
        Mode::Month,
    )
    .unwrap();

    assert_eq!(
        chronos.next(Some(at(2024, 3, 1, 0, 0, 0)), 1).unwrap(),
        at(2028, 2, 29, 12, 0, 0)
    );
    assert_eq!(
        chronos.prev(Some(at(2024, 2, 29, 11, 59, 59)), 1).unwrap(),
        at(2020, 2, 29, 12, 0, 0)
    );
    assert_eq!(
        chronos.next(Some(at(2096, 3, 1, 0, 0, 0)), 1).unwrap(),
        at(2104, 2, 29, 12, 0, 0)
    );
}

#[test]
fn test_day_of_year_mode() {
    // 100th day of each year at noon
    let chronos = Chronos::new(
        &[FieldSpec::Any, FieldSpec::at(100)],
        &[FieldSpec::at(12), FieldSpec::at(0), FieldSpec::at(0)],
        Mode::Day,
    )
    .unwrap();

    assert_eq!(
        chronos.next(Some(at(2023, 1, 1, 0, 0, 0)), 1).unwrap(),
        at(2023, 4, 10, 12, 0, 0)
    );
    assert_eq!(
        chronos.next(Some(at(2023, 1, 1, 0, 0, 0)), 2).unwrap(),
        at(2024, 4, 9, 12, 0, 0)
    );

    let last = Chronos::new(&[FieldSpec::Any, FieldSpec::at(-1)], &midnight(), Mode::Day).unwrap();
    assert_eq!(
        last.next(Some(at(2024, 6, 1, 0, 0, 0)), 1).unwrap(),
        at(2024, 12, 31, 0, 0, 0)
    );
}

#[test]
fn test_iso_week_53() {
    // Thursday of ISO week 53
    let chronos = Chronos::new(
        &[FieldSpec::Any, FieldSpec::at(53), FieldSpec::at(4)],
        &midnight(),
        Mode::Week,
    )
    .unwrap();

    let next = chronos.next(Some(at(2021, 6, 1, 0, 0, 0)), 1).unwrap();
    assert_eq!(next, at(2026, 12, 31, 0, 0, 0));
    assert_eq!(next.weekday(), Weekday::Thu);

    let prev = chronos.prev(Some(at(2021, 6, 1, 0, 0, 0)), 1).unwrap();
    assert_eq!(prev, at(2020, 12, 31, 0, 0, 0));
}

#[test]
fn test_week_mode_weekdays() {
    // Mondays and Fridays at 08:00
    let chronos = Chronos::new(
        &[FieldSpec::Any, FieldSpec::Any, FieldSpec::list([1, 5])],
        &[FieldSpec::at(8), FieldSpec::at(0), FieldSpec::at(0)],
        Mode::Week,
    )
    .unwrap();

    // Wednesday 2024-05-08
    let from = at(2024, 5, 8, 12, 0, 0);
    let upcoming = chronos.upcoming(Some(from), 3).unwrap();
    assert_eq!(
        upcoming,
        vec![
            at(2024, 5, 10, 8, 0, 0),
            at(2024, 5, 13, 8, 0, 0),
            at(2024, 5, 17, 8, 0, 0),
        ]
    );
    let preceding = chronos.preceding(Some(from), 2).unwrap();
    assert_eq!(preceding, vec![at(2024, 5, 6, 8, 0, 0), at(2024, 5, 3, 8, 0, 0)]);
}

#[test]
fn test_month_week_rows() {
    // Sunday closing the first week row of each month
    let chronos = Chronos::new(
        &[FieldSpec::Any, FieldSpec::Any, FieldSpec::at(1), FieldSpec::at(7)],
        &midnight(),
        Mode::MonthWeek,
    )
    .unwrap();

    let upcoming = chronos.upcoming(Some(at(2021, 4, 5, 0, 0, 0)), 3).unwrap();
    assert_eq!(
        upcoming,
        vec![
            at(2021, 5, 2, 0, 0, 0),
            at(2021, 6, 6, 0, 0, 0),
            at(2021, 7, 4, 0, 0, 0),
        ]
    );

    // Monday of the last row exists in every month
    let chronos = Chronos::new(
        &[FieldSpec::Any, FieldSpec::Any, FieldSpec::at(-1), FieldSpec::at(1)],
        &midnight(),
        Mode::MonthWeek,
    )
    .unwrap();
    assert_eq!(
        chronos.next(Some(at(2021, 5, 1, 0, 0, 0)), 1).unwrap(),
        at(2021, 5, 31, 0, 0, 0)
    );
    assert_eq!(
        chronos.next(Some(at(2021, 5, 31, 0, 0, 0)), 1).unwrap(),
        at(2021, 6, 28, 0, 0, 0)
    );
}

#[test]
fn test_daily_span() {
    let daily = |hour| {
        Chronos::new(
            &[FieldSpec::Any, FieldSpec::Any, FieldSpec::Any],
            &[FieldSpec::at(hour), FieldSpec::at(0), FieldSpec::at(0)],
            Mode::Month,
        )
        .unwrap()
    };
    let span = Span::new(daily(9), daily(17));

    for hour in 0..24 {
        let instant = at(2024, 7, 4, hour, 0, 0);
        assert_eq!(span.contains(Some(instant)), (9..17).contains(&hour), "hour {}", hour);
    }
}

#[test]
fn test_invalid_specs() {
    let err = Chronos::new(
        &[FieldSpec::Any, FieldSpec::at(13), FieldSpec::Any],
        &midnight(),
        Mode::Month,
    )
    .unwrap_err();
    assert!(matches!(err, ChronosError::InvalidSpec(_)));

    let err = Chronos::new(
        &[FieldSpec::Any, FieldSpec::Any, FieldSpec::List(vec![])],
        &midnight(),
        Mode::Month,
    )
    .unwrap_err();
    assert!(matches!(err, ChronosError::InvalidSpec(_)));

    let err = Chronos::new(&[FieldSpec::Any], &midnight(), Mode::Day).unwrap_err();
    assert!(matches!(err, ChronosError::InvalidSpec(_)));

    let err = Chronos::new(
        &[FieldSpec::Any, FieldSpec::Any],
        &[FieldSpec::at(0), FieldSpec::stepped(0, 59, 0), FieldSpec::at(0)],
        Mode::Day,
    )
    .unwrap_err();
    assert!(matches!(err, ChronosError::InvalidSpec(_)));
}

#[test]
fn test_impossible_dates_are_inadequate() {
    let chronos = Chronos::new(
        &[FieldSpec::Any, FieldSpec::at(2), FieldSpec::at(30)],
        &midnight(),
        Mode::Month,
    )
    .unwrap();
    assert!(matches!(
        chronos.next(Some(at(2024, 1, 1, 0, 0, 0)), 1),
        Err(ChronosError::Inadequate(_))
    ));
    assert!(matches!(
        chronos.prev(Some(at(2024, 1, 1, 0, 0, 0)), 1),
        Err(ChronosError::Inadequate(_))
    ));
}

#[test]
fn test_year_limits() {
    let chronos = Chronos::new(
        &[FieldSpec::range(2020, 2022), FieldSpec::Any, FieldSpec::Any],
        &midnight(),
        Mode::Month,
    )
    .unwrap();
    assert!(matches!(
        chronos.next(Some(at(2022, 12, 31, 0, 0, 0)), 1),
        Err(ChronosError::Inadequate(_))
    ));
    assert_eq!(
        chronos.next(Some(at(2019, 5, 5, 0, 0, 0)), 1).unwrap(),
        at(2020, 1, 1, 0, 0, 0)
    );
    assert!(matches!(
        chronos.next(Some(at(10_000, 1, 1, 0, 0, 0)), 1),
        Err(ChronosError::OutOfRange(_))
    ));
}
