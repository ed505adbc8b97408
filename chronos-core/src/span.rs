//! Recurring windows between two schedules.

use crate::chronos::Chronos;
use chrono::NaiveDateTime;
use tracing::trace;

/// Recurring half-open window `[start, end)` bounded by two schedules.
///
/// An instant is inside the span when the most recent start at or before it
/// is later than the most recent end at or before it.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use chronos_core::{Chronos, FieldSpec, Mode, Span};
///
/// let daily = |hour| {
///     Chronos::new(
///         &[FieldSpec::Any, FieldSpec::Any, FieldSpec::Any],
///         &[FieldSpec::at(hour), FieldSpec::at(0), FieldSpec::at(0)],
///         Mode::Month,
///     )
///     .unwrap()
/// };
/// let office_hours = Span::new(daily(9), daily(17));
///
/// let noon = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// assert!(office_hours.contains(Some(noon)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    start: Chronos,
    end: Chronos,
}

impl Span {
    pub fn new(start: Chronos, end: Chronos) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> &Chronos {
        &self.start
    }

    pub fn end(&self) -> &Chronos {
        &self.end
    }

    /// Returns true when the instant lies inside an open window.
    ///
    /// With no start before the instant the span has never opened. With a
    /// start but no end it has never closed.
    pub fn contains(&self, instant: Option<NaiveDateTime>) -> bool {
        let instant = instant.unwrap_or_else(|| chrono::Utc::now().naive_utc());
        let opened = self.start.prev(Some(instant), 0);
        let closed = self.end.prev(Some(instant), 0);
        trace!(
            instant = %instant,
            opened = ?opened.as_ref().ok(),
            closed = ?closed.as_ref().ok(),
            "span lookup"
        );
        match (opened, closed) {
            (Ok(opened), Ok(closed)) => opened > closed,
            (Ok(_), Err(_)) => true,
            (Err(_), _) => false,
        }
    }
}
