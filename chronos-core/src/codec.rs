//! Conversion between instants and field tuples.
//!
//! This is the only place where chrono's one-based numbering meets the
//! zero-based tuples the rest of the crate works with.

use crate::error::{ChronosError, ChronosResult};
use crate::fields::{DateFields, TimeFields};
use crate::gregorian;
use crate::mode::Mode;
use crate::spec::{YEAR_MAX, YEAR_MIN};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// An instant split into calendar and clock fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    pub date: DateFields,
    pub time: TimeFields,

    /// False when the instant has a sub-second remainder the tuples drop.
    pub exact: bool,
}

/// Split an instant into the field tuples of `mode`.
pub fn encode(mode: Mode, instant: &NaiveDateTime) -> ChronosResult<Encoded> {
    let date = instant.date();
    let year = match mode {
        Mode::Week => date.iso_week().year(),
        _ => date.year(),
    };
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Err(ChronosError::out_of_range(format!(
            "year {} is outside {}..={}",
            year, YEAR_MIN, YEAR_MAX
        )));
    }
    let index = (year - YEAR_MIN) as u32;
    let weekday = date.weekday().num_days_from_monday();

    let fields = match mode {
        Mode::Day => DateFields::from_slice(&[index, date.ordinal0()]),
        Mode::Month => DateFields::from_slice(&[index, date.month0(), date.day0()]),
        Mode::Week => DateFields::from_slice(&[index, date.iso_week().week0(), weekday]),
        Mode::MonthWeek => {
            let opening = gregorian::weekday(year, date.month(), 1);
            let row = (date.day0() + opening) / 7;
            DateFields::from_slice(&[index, date.month0(), row, weekday])
        }
    };
    let date = fields.ok_or_else(|| ChronosError::out_of_range("too many calendar fields"))?;

    Ok(Encoded {
        date,
        time: TimeFields::new(instant.hour(), instant.minute(), instant.second()),
        exact: instant.nanosecond() == 0,
    })
}

/// Join field tuples of `mode` back into an instant.
///
/// Fails with [`ChronosError::OutOfRange`] when the tuple does not name a real
/// date, e.g. day 31 of April.
///
/// Week-mode years are ISO week-years, so the last days of ISO year 9999
/// decode to instants in early January 10000. They encode back to the same
/// tuple; in the other modes year 10000 is out of range.
pub fn decode(mode: Mode, date: &DateFields, time: &TimeFields) -> ChronosResult<NaiveDateTime> {
    if date.len() != mode.depth() {
        return Err(ChronosError::out_of_range(format!(
            "{} dates have {} fields, got {}",
            mode,
            mode.depth(),
            date.len()
        )));
    }
    let invalid = || ChronosError::out_of_range(format!("{} is not a {} date", date, mode));
    let year = YEAR_MIN + date.get(0) as i32;

    let day = match mode {
        Mode::Day => NaiveDate::from_yo_opt(year, date.get(1) + 1),
        Mode::Month => NaiveDate::from_ymd_opt(year, date.get(1) + 1, date.get(2) + 1),
        Mode::Week => {
            let weekday = WEEKDAYS.get(date.get(2) as usize).ok_or_else(invalid)?;
            NaiveDate::from_isoywd_opt(year, date.get(1) + 1, *weekday)
        }
        Mode::MonthWeek => {
            let month = date.get(1) + 1;
            let opening = i64::from(gregorian::weekday(year, month, 1));
            let day = i64::from(date.get(2)) * 7 + i64::from(date.get(3)) - opening + 1;
            u32::try_from(day)
                .ok()
                .and_then(|day| NaiveDate::from_ymd_opt(year, month, day))
        }
    }
    .ok_or_else(invalid)?;

    day.and_hms_opt(time.hour(), time.minute(), time.second())
        .ok_or_else(|| ChronosError::out_of_range(format!("{} is not a time of day", time)))
}
