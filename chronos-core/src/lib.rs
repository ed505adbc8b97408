//! Cron-like temporal pattern engine.
//!
//! A schedule constrains calendar fields (year, month, day, ISO week,
//! weekday, ...) and clock fields (hour, minute, second). For any instant it
//! answers whether the instant matches, which match comes `leap` matches
//! later and which came `leap` matches earlier.
//!
//! Schedules are built bottom-up:
//!
//! - [`Mark`] - valid values of one field within a bounded cycle, with
//!   closed-form stepping that reports how many cycles a step consumed
//! - [`Hand`] / [`Clock`] - hour, minute and second marks composed into a
//!   mixed-radix time of day
//! - [`Node`] / [`Calendar`] - calendar levels whose valid values depend on
//!   the levels above them (month lengths, leap years, ISO long years)
//! - [`Chronos`] - a calendar and a clock stepped together
//! - [`Span`] - recurring windows between two schedules
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use chronos_core::{Chronos, FieldSpec, Mode};
//!
//! // Every 15 minutes during working hours, Monday to Friday
//! let chronos = Chronos::new(
//!     &[FieldSpec::Any, FieldSpec::Any, FieldSpec::range(1, 5)],
//!     &[FieldSpec::range(9, 17), FieldSpec::stepped(0, 59, 15), FieldSpec::at(0)],
//!     Mode::Week,
//! )
//! .unwrap();
//!
//! // Friday evening
//! let from = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap().and_hms_opt(18, 0, 0).unwrap();
//!
//! assert_eq!(chronos.next(Some(from), 1).unwrap().to_string(), "2024-05-13 09:00:00");
//! assert_eq!(chronos.prev(Some(from), 1).unwrap().to_string(), "2024-05-10 17:45:00");
//! assert!(!chronos.contains(Some(from)));
//! ```
//!
//! ## Field Numbering
//!
//! Specs use the numbering people write: absolute years, months and days
//! from 1, ISO weekdays from 1 (Monday) to 7 (Sunday), hours, minutes and
//! seconds from 0. Negative values count back from the end of the cycle, so
//! `FieldSpec::at(-1)` as a day is the last day of each month.

pub mod calendar;
pub mod chronos;
pub mod clock;
pub mod codec;
pub mod error;
pub mod fields;
pub mod gregorian;
pub mod hand;
pub mod mark;
pub mod mode;
pub mod node;
pub mod span;
pub mod spec;

pub use calendar::Calendar;
pub use chronos::Chronos;
pub use clock::Clock;
pub use codec::{Encoded, decode, encode};
pub use error::{ChronosError, ChronosResult};
pub use fields::{DateFields, TimeFields};
pub use hand::{Hand, HandKind};
pub use mark::{Mark, Seq};
pub use mode::Mode;
pub use node::{Child, Discriminant, Node};
pub use span::Span;
pub use spec::{FieldKind, FieldSpec, YEAR_MAX, YEAR_MIN};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::chronos::Chronos;
    pub use crate::error::{ChronosError, ChronosResult};
    pub use crate::mode::Mode;
    pub use crate::span::Span;
    pub use crate::spec::FieldSpec;
}
