//! Error types for schedule construction and stepping.

use thiserror::Error;

/// Result type for chronos operations.
pub type ChronosResult<T> = Result<T, ChronosError>;

/// Chronos-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChronosError {
    /// A field specification cannot describe a valid set of values.
    ///
    /// Raised while building marks, clocks and calendars, never while stepping.
    #[error("Invalid field specification: {0}")]
    InvalidSpec(String),

    /// A step cannot be resolved within one wrap of the year level.
    #[error("Schedule cannot be satisfied: {0}")]
    Inadequate(String),

    /// A calendar level found no boundary to land on.
    ///
    /// Only produced inside the calendar; it is converted to
    /// [`ChronosError::Inadequate`] before leaving it.
    #[doc(hidden)]
    #[error("No boundary found at calendar level {level}")]
    Indecisive { level: usize },

    /// An instant or field tuple lies outside the supported range.
    #[error("Out of range: {0}")]
    OutOfRange(String),
}

impl ChronosError {
    /// Create a new invalid specification error
    pub fn invalid_spec<S: Into<String>>(msg: S) -> Self {
        Self::InvalidSpec(msg.into())
    }

    /// Create a new inadequate schedule error
    pub fn inadequate<S: Into<String>>(msg: S) -> Self {
        Self::Inadequate(msg.into())
    }

    /// Create a new out of range error
    pub fn out_of_range<S: Into<String>>(msg: S) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Convert the calendar-internal signal into its public form.
    pub(crate) fn settle(self) -> Self {
        match self {
            Self::Indecisive { level } => Self::Inadequate(format!(
                "no matching date before the calendar wrapped at level {}",
                level
            )),
            other => other,
        }
    }

    /// Returns true for errors caused by the schedule itself rather than the input.
    pub fn is_schedule_error(&self) -> bool {
        matches!(self, Self::InvalidSpec(_) | Self::Inadequate(_))
    }
}
