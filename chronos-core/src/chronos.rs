//! Schedules over calendar and clock fields.

use crate::calendar::Calendar;
use crate::clock::Clock;
use crate::codec::{self, Encoded};
use crate::error::{ChronosError, ChronosResult};
use crate::fields::{DateFields, TimeFields};
use crate::mode::Mode;
use crate::spec::FieldSpec;
use chrono::{NaiveDateTime, Utc};
use tracing::{debug, trace, warn};

/// A schedule: the instants whose calendar fields match a [`Calendar`] and
/// whose time of day matches a [`Clock`].
///
/// Instants are naive; the caller decides which time zone they live in.
/// Queries that take `Option<NaiveDateTime>` use the current UTC time for
/// `None`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use chronos_core::{Chronos, FieldSpec, Mode};
///
/// // 09:30 on the last day of every month
/// let chronos = Chronos::new(
///     &[FieldSpec::Any, FieldSpec::Any, FieldSpec::at(-1)],
///     &[FieldSpec::at(9), FieldSpec::at(30), FieldSpec::at(0)],
///     Mode::Month,
/// )
/// .unwrap();
///
/// let from = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let next = chronos.next(Some(from), 1).unwrap();
/// assert_eq!(next.to_string(), "2024-02-29 09:30:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chronos {
    calendar: Calendar,
    clock: Clock,
}

impl Chronos {
    /// Build a schedule from calendar specs (one per field of `mode`) and
    /// clock specs (hour, minute, second).
    pub fn new(calendar: &[FieldSpec], clock: &[FieldSpec], mode: Mode) -> ChronosResult<Self> {
        let chronos = Self::from_parts(Calendar::new(mode, calendar)?, Clock::new(clock)?);
        debug!(
            mode = %mode,
            calendar = %join(calendar),
            clock = %join(clock),
            "Built schedule"
        );
        Ok(chronos)
    }

    pub fn from_parts(calendar: Calendar, clock: Clock) -> Self {
        Self { calendar, clock }
    }

    pub fn mode(&self) -> Mode {
        self.calendar.mode()
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Returns true when the instant matches, ignoring any sub-second part.
    ///
    /// Instants outside the supported years never match.
    pub fn contains(&self, instant: Option<NaiveDateTime>) -> bool {
        let instant = instant.unwrap_or_else(now);
        match codec::encode(self.mode(), &instant) {
            Ok(encoded) => {
                self.calendar.contains(&encoded.date) && self.clock.contains(&encoded.time)
            }
            Err(_) => false,
        }
    }

    /// The `leap`-th match after `instant`.
    ///
    /// `leap = 0` returns the earliest match at or after `instant`, which is
    /// `instant` itself when it matches.
    pub fn next(&self, instant: Option<NaiveDateTime>, leap: u32) -> ChronosResult<NaiveDateTime> {
        let from = instant.unwrap_or_else(now);
        self.step_forward(&from, u64::from(leap))
            .inspect_err(|err| self.report(&from, leap, "next", err))
    }

    /// The `leap`-th match before `instant`.
    ///
    /// `leap = 0` returns the latest match at or before `instant`.
    pub fn prev(&self, instant: Option<NaiveDateTime>, leap: u32) -> ChronosResult<NaiveDateTime> {
        let from = instant.unwrap_or_else(now);
        self.step_backward(&from, u64::from(leap))
            .inspect_err(|err| self.report(&from, leap, "prev", err))
    }

    /// The next `count` matches after `instant`, earliest first.
    pub fn upcoming(
        &self,
        instant: Option<NaiveDateTime>,
        count: usize,
    ) -> ChronosResult<Vec<NaiveDateTime>> {
        let mut cursor = instant.unwrap_or_else(now);
        let mut matches = Vec::with_capacity(count);
        for _ in 0..count {
            cursor = self.next(Some(cursor), 1)?;
            matches.push(cursor);
        }
        Ok(matches)
    }

    /// The previous `count` matches before `instant`, latest first.
    pub fn preceding(
        &self,
        instant: Option<NaiveDateTime>,
        count: usize,
    ) -> ChronosResult<Vec<NaiveDateTime>> {
        let mut cursor = instant.unwrap_or_else(now);
        let mut matches = Vec::with_capacity(count);
        for _ in 0..count {
            cursor = self.prev(Some(cursor), 1)?;
            matches.push(cursor);
        }
        Ok(matches)
    }

    fn step_forward(&self, from: &NaiveDateTime, leap: u64) -> ChronosResult<NaiveDateTime> {
        let Encoded { date, time, exact } = codec::encode(self.mode(), from)?;

        // Snap onto a match; `ch` is the leap the snap used up.
        let (mut date, mut time, ch) = if self.calendar.contains(&date) {
            let (time, ch, carry) = self.clock.reset_next(&time, !exact);
            (self.calendar.next(&date, carry)?, time, ch)
        } else {
            let (date, _) = self.calendar.reset_next(&date)?;
            (date, self.clock.first(), 1)
        };
        trace!(date = %date, time = %time, ch, "reset forward");

        if leap > ch {
            let (landing, carry) = self.clock.next(&time, leap - ch);
            time = landing;
            date = self.calendar.next(&date, carry)?;
            trace!(date = %date, time = %time, carry, "step forward");
        }
        self.decode(&date, &time)
    }

    fn step_backward(&self, from: &NaiveDateTime, leap: u64) -> ChronosResult<NaiveDateTime> {
        let Encoded { date, time, exact } = codec::encode(self.mode(), from)?;

        let (mut date, mut time, ch) = if self.calendar.contains(&date) {
            let (time, ch, borrow) = self.clock.reset_prev(&time, !exact);
            (self.calendar.prev(&date, borrow)?, time, ch)
        } else {
            let (date, _) = self.calendar.reset_prev(&date)?;
            (date, self.clock.last(), 1)
        };
        trace!(date = %date, time = %time, ch, "reset backward");

        if leap > ch {
            let (landing, borrow) = self.clock.prev(&time, leap - ch);
            time = landing;
            date = self.calendar.prev(&date, borrow)?;
            trace!(date = %date, time = %time, borrow, "step backward");
        }
        self.decode(&date, &time)
    }

    fn decode(&self, date: &DateFields, time: &TimeFields) -> ChronosResult<NaiveDateTime> {
        codec::decode(self.mode(), date, time)
    }

    fn report(&self, from: &NaiveDateTime, leap: u32, direction: &str, err: &ChronosError) {
        match err {
            ChronosError::Inadequate(reason) => warn!(
                mode = %self.mode(),
                from = %from,
                leap,
                direction,
                reason = %reason,
                "Schedule has no match"
            ),
            other => debug!(from = %from, leap, direction, error = %other, "Query failed"),
        }
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn join(specs: &[FieldSpec]) -> String {
    specs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
