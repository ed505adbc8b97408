//! Fuzz target for schedule queries.
//!
//! Builds schedules from arbitrary field specs and checks that every match
//! returned by a query lies on the right side of the start instant and is
//! accepted by the schedule itself.

#![no_main]

use arbitrary::Arbitrary;
use chrono::{Duration, NaiveDate};
use libfuzzer_sys::fuzz_target;

use chronos_core::{Chronos, FieldSpec, Mode};

/// Arbitrary field spec with values near the fields' ranges.
#[derive(Debug, Arbitrary)]
enum FuzzSpec {
    Any,
    At(i16),
    Range { start: i16, end: i16, step: u8 },
    List(Vec<i16>),
}

impl From<FuzzSpec> for FieldSpec {
    fn from(spec: FuzzSpec) -> Self {
        match spec {
            FuzzSpec::Any => FieldSpec::Any,
            FuzzSpec::At(v) => FieldSpec::At(i64::from(v)),
            FuzzSpec::Range { start, end, step } => {
                FieldSpec::stepped(i64::from(start), i64::from(end), u32::from(step))
            }
            FuzzSpec::List(values) => FieldSpec::List(values.into_iter().map(i64::from).collect()),
        }
    }
}

/// Arbitrary schedule and query.
#[derive(Debug, Arbitrary)]
struct FuzzQuery {
    mode: u8,
    calendar: Vec<FuzzSpec>,
    clock: [FuzzSpec; 3],
    /// Seconds from 1900-01-01
    offset: u32,
    leap: u8,
}

fuzz_target!(|query: FuzzQuery| {
    let mode = match query.mode % 4 {
        0 => Mode::Day,
        1 => Mode::Month,
        2 => Mode::Week,
        _ => Mode::MonthWeek,
    };
    let mut calendar: Vec<FieldSpec> = query.calendar.into_iter().map(FieldSpec::from).collect();
    calendar.truncate(mode.depth());
    let clock: Vec<FieldSpec> = query.clock.into_iter().map(FieldSpec::from).collect();

    let Ok(chronos) = Chronos::new(&calendar, &clock, mode) else {
        return;
    };

    let Some(base) = NaiveDate::from_ymd_opt(1900, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        return;
    };
    let t = base + Duration::seconds(i64::from(query.offset));
    let leap = u32::from(query.leap);

    if let Ok(next) = chronos.next(Some(t), leap) {
        assert!(chronos.contains(Some(next)));
        if leap == 0 {
            assert!(next >= t);
        } else {
            assert!(next > t);
        }
    }

    if let Ok(prev) = chronos.prev(Some(t), leap) {
        assert!(chronos.contains(Some(prev)));
        if leap == 0 {
            assert!(prev <= t);
        } else {
            assert!(prev < t);
        }
    }
});
