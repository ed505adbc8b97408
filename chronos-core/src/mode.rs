//! Calendar hierarchies a schedule can be written against.

use crate::error::ChronosError;
use crate::spec::FieldKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which calendar fields a schedule constrains.
///
/// | Mode        | Fields                                   |
/// |-------------|------------------------------------------|
/// | `Day`       | year, day of year                        |
/// | `Month`     | year, month, day of month                |
/// | `Week`      | ISO week-year, ISO week, weekday         |
/// | `MonthWeek` | year, month, week row of month, weekday  |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Day,
    #[default]
    Month,
    Week,
    MonthWeek,
}

impl Mode {
    /// Number of calendar fields.
    pub fn depth(self) -> usize {
        self.fields().len()
    }

    /// Calendar fields, most-significant first.
    pub fn fields(self) -> &'static [FieldKind] {
        match self {
            Mode::Day => &[FieldKind::YEAR, FieldKind::DAY_OF_YEAR],
            Mode::Month => &[FieldKind::YEAR, FieldKind::MONTH, FieldKind::DAY_OF_MONTH],
            Mode::Week => &[
                FieldKind::YEAR,
                FieldKind::WEEK_OF_YEAR,
                FieldKind::DAY_OF_WEEK,
            ],
            Mode::MonthWeek => &[
                FieldKind::YEAR,
                FieldKind::MONTH,
                FieldKind::WEEK_OF_MONTH,
                FieldKind::DAY_OF_WEEK,
            ],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Day => "day",
            Mode::Month => "month",
            Mode::Week => "week",
            Mode::MonthWeek => "month_week",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ChronosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "day_of_year" => Ok(Mode::Day),
            "month" => Ok(Mode::Month),
            "week" => Ok(Mode::Week),
            "month_week" | "monthweek" => Ok(Mode::MonthWeek),
            other => Err(ChronosError::invalid_spec(format!("unknown mode: {}", other))),
        }
    }
}
