//! Parsed field specifications and the fields they apply to.
//!
//! A [`FieldSpec`] is what a schedule parser hands over for one calendar or
//! clock field. Values are written the way people write them (absolute years,
//! months and days starting at 1, ISO weekdays 1 = Monday through 7 = Sunday);
//! negative values count back from the end of the cycle, so `-1` is the last
//! day of the month or the last week of the year.
//!
//! [`FieldKind`] describes where a field's numbering starts and how large its
//! widest cycle is, and translates specs into the zero-based values marks
//! work with.

use crate::error::{ChronosError, ChronosResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// First supported year.
pub const YEAR_MIN: i32 = 1;

/// Last supported year.
pub const YEAR_MAX: i32 = 9999;

/// Constraint on the values of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSpec {
    /// Every value of the cycle.
    #[default]
    Any,

    /// A single value.
    At(i64),

    /// Inclusive range stepping by `step`; wraps past the end of the cycle
    /// when `start` lies after `end`.
    Range {
        start: i64,
        end: i64,
        #[serde(default = "default_step")]
        step: u32,
    },

    /// An explicit list of values.
    List(Vec<i64>),
}

fn default_step() -> u32 {
    1
}

impl FieldSpec {
    /// A single value.
    pub fn at(value: i64) -> Self {
        Self::At(value)
    }

    /// Every value from `start` through `end`.
    pub fn range(start: i64, end: i64) -> Self {
        Self::Range {
            start,
            end,
            step: 1,
        }
    }

    /// Every `step`-th value from `start` through `end`.
    pub fn stepped(start: i64, end: i64, step: u32) -> Self {
        Self::Range { start, end, step }
    }

    /// An explicit list of values.
    pub fn list<I: IntoIterator<Item = i64>>(values: I) -> Self {
        Self::List(values.into_iter().collect())
    }

    /// Returns true when the spec places no constraint on the field.
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSpec::Any => write!(f, "*"),
            FieldSpec::At(value) => write!(f, "{}", value),
            FieldSpec::Range { start, end, step } if *step == 1 => write!(f, "{}~{}", start, end),
            FieldSpec::Range { start, end, step } => write!(f, "{}~{}/{}", start, end, step),
            FieldSpec::List(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}

/// Numbering of one calendar or clock field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKind {
    /// Field name used in error messages
    pub name: &'static str,

    /// Value people use for the first position of the cycle
    pub origin: i64,

    /// Largest zero-based value of the widest cycle
    pub cap: u32,
}

impl FieldKind {
    pub const YEAR: FieldKind = FieldKind {
        name: "year",
        origin: YEAR_MIN as i64,
        cap: (YEAR_MAX - YEAR_MIN) as u32,
    };
    pub const MONTH: FieldKind = FieldKind {
        name: "month",
        origin: 1,
        cap: 11,
    };
    pub const DAY_OF_MONTH: FieldKind = FieldKind {
        name: "day",
        origin: 1,
        cap: 30,
    };
    pub const DAY_OF_YEAR: FieldKind = FieldKind {
        name: "day of year",
        origin: 1,
        cap: 365,
    };
    pub const WEEK_OF_YEAR: FieldKind = FieldKind {
        name: "week",
        origin: 1,
        cap: 52,
    };
    pub const WEEK_OF_MONTH: FieldKind = FieldKind {
        name: "week of month",
        origin: 1,
        cap: 5,
    };
    pub const DAY_OF_WEEK: FieldKind = FieldKind {
        name: "weekday",
        origin: 1,
        cap: 6,
    };
    pub const HOUR: FieldKind = FieldKind {
        name: "hour",
        origin: 0,
        cap: 23,
    };
    pub const MINUTE: FieldKind = FieldKind {
        name: "minute",
        origin: 0,
        cap: 59,
    };
    pub const SECOND: FieldKind = FieldKind {
        name: "second",
        origin: 0,
        cap: 59,
    };

    /// Translate a spec written in this field's numbering into zero-based values.
    ///
    /// Negative values are kept as they are; marks resolve them against their
    /// own cycle, which may be shorter than this field's widest one.
    pub fn to_domain(&self, spec: &FieldSpec) -> ChronosResult<FieldSpec> {
        Ok(match spec {
            FieldSpec::Any => FieldSpec::Any,
            FieldSpec::At(value) => FieldSpec::At(self.rebase(*value)?),
            FieldSpec::Range { start, end, step } => {
                if *step == 0 {
                    return Err(ChronosError::invalid_spec(format!(
                        "{}: step must be at least 1",
                        self.name
                    )));
                }
                FieldSpec::Range {
                    start: self.rebase(*start)?,
                    end: self.rebase(*end)?,
                    step: *step,
                }
            }
            FieldSpec::List(values) => {
                if values.is_empty() {
                    return Err(ChronosError::invalid_spec(format!(
                        "{}: value list is empty",
                        self.name
                    )));
                }
                FieldSpec::List(
                    values
                        .iter()
                        .map(|v| self.rebase(*v))
                        .collect::<ChronosResult<Vec<_>>>()?,
                )
            }
        })
    }

    fn rebase(&self, value: i64) -> ChronosResult<i64> {
        let size = i64::from(self.cap) + 1;
        if value < 0 {
            if value < -size {
                return Err(ChronosError::invalid_spec(format!(
                    "{}: {} reaches before the start of the cycle",
                    self.name, value
                )));
            }
            return Ok(value);
        }
        if value < self.origin || value - self.origin >= size {
            return Err(ChronosError::invalid_spec(format!(
                "{}: {} is outside {}..={}",
                self.name,
                value,
                self.origin,
                self.origin + size - 1
            )));
        }
        Ok(value - self.origin)
    }
}
