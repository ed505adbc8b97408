//! Field tuples passed between the codec, the clock and the calendar.
//!
//! Both tuples are ordered most-significant first and hold zero-based values:
//! year index, month 0..=11, day 0..=30 and so on. Comparing two tuples of the
//! same mode compares the instants they denote.

use std::fmt;

/// Deepest calendar stack (month-week mode).
pub const MAX_DEPTH: usize = 4;

/// Calendar fields of one date, most-significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateFields {
    values: [u32; MAX_DEPTH],
    depth: usize,
}

impl DateFields {
    /// Build from up to [`MAX_DEPTH`] values; `None` when there are more.
    pub fn from_slice(values: &[u32]) -> Option<Self> {
        if values.is_empty() || values.len() > MAX_DEPTH {
            return None;
        }
        let mut fields = Self {
            values: [0; MAX_DEPTH],
            depth: values.len(),
        };
        fields.values[..values.len()].copy_from_slice(values);
        Some(fields)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.depth
    }

    /// Always false; a date has at least a year.
    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Value of the field at `level` (0 is the year).
    pub fn get(&self, level: usize) -> u32 {
        self.values[level]
    }

    pub(crate) fn set(&mut self, level: usize, value: u32) {
        self.values[level] = value;
    }

    /// All fields, most-significant first.
    pub fn as_slice(&self) -> &[u32] {
        &self.values[..self.depth]
    }

    /// Fields above `level`.
    pub fn prefix(&self, level: usize) -> &[u32] {
        &self.values[..level]
    }
}

impl fmt::Display for DateFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.as_slice().iter().map(|v| v.to_string()).collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

/// Clock fields of one instant: hour, minute, second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeFields([u32; 3]);

impl TimeFields {
    pub const HOUR: usize = 0;
    pub const MINUTE: usize = 1;
    pub const SECOND: usize = 2;

    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self([hour, minute, second])
    }

    pub fn hour(&self) -> u32 {
        self.0[Self::HOUR]
    }

    pub fn minute(&self) -> u32 {
        self.0[Self::MINUTE]
    }

    pub fn second(&self) -> u32 {
        self.0[Self::SECOND]
    }

    pub fn get(&self, index: usize) -> u32 {
        self.0[index]
    }

    pub(crate) fn set(&mut self, index: usize, value: u32) {
        self.0[index] = value;
    }
}

impl fmt::Display for TimeFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())
    }
}
