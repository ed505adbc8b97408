//! Valid-value sets over a bounded cycle.
//!
//! A [`Mark`] is the set of valid positions of one field within a cycle
//! `0..=cap`: the valid minutes of an hour, the valid days of a 30-day month.
//! Besides membership it answers the two questions every level of a schedule
//! asks of the level below it:
//!
//! - where do I land after walking `leap` valid positions forward or back, and
//! - how many full cycles did that walk consume (the carry or borrow the level
//!   above must absorb).
//!
//! Stepping is closed-form for every variant: Solo and Every by plain
//! arithmetic, Seq by index arithmetic over its progression, Enum by binary
//! search.
//!
//! # Example
//!
//! ```
//! use chronos_core::Mark;
//!
//! // Odd values of a 0..=6 cycle
//! let mark = Mark::seq(1, 5, 2, 6).unwrap();
//! assert_eq!(mark.marks(), vec![1, 3, 5]);
//!
//! // Two steps from 5 wraps once and lands on 3
//! assert_eq!(mark.next(5, 2), (3, 1));
//! assert_eq!(mark.prev(1, 1), (5, 1));
//! ```

use crate::error::{ChronosError, ChronosResult};
use crate::spec::FieldSpec;

/// Set of valid values within `0..=cap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    /// Exactly one valid value.
    Solo { cap: u32, mark: u32 },

    /// Every value of the cycle.
    Every { cap: u32 },

    /// Arithmetic progression, possibly crossing the cycle's zero point.
    Seq(Seq),

    /// Explicit sorted set of values.
    Enum { cap: u32, marks: Vec<u32> },
}

/// Resolve negative values against the end of the cycle.
fn normalize(value: i64, cap: u32) -> i64 {
    if value < 0 {
        i64::from(cap) + 1 + value
    } else {
        value
    }
}

fn checked(value: i64, cap: u32) -> ChronosResult<u32> {
    let normalized = normalize(value, cap);
    if normalized < 0 || normalized > i64::from(cap) {
        return Err(ChronosError::invalid_spec(format!(
            "value {} does not fit the cycle 0..={}",
            value, cap
        )));
    }
    Ok(normalized as u32)
}

impl Mark {
    /// A mark with a single valid value.
    pub fn solo(mark: i64, cap: u32) -> ChronosResult<Self> {
        let mark = checked(mark, cap)?;
        Ok(Mark::Solo { cap, mark })
    }

    /// A mark accepting every value of `0..=cap`.
    pub fn every(cap: u32) -> ChronosResult<Self> {
        if cap == 0 {
            return Err(ChronosError::invalid_spec("cycle must hold at least two values"));
        }
        Ok(Mark::Every { cap })
    }

    /// Every `itv`-th value from `start` through `end`.
    ///
    /// When `start` lies after `end` (once normalized) the progression runs
    /// to the end of the cycle and continues from zero.
    pub fn seq(start: i64, end: i64, itv: u32, cap: u32) -> ChronosResult<Self> {
        if cap == 0 {
            return Err(ChronosError::invalid_spec("cycle must hold at least two values"));
        }
        if itv == 0 {
            return Err(ChronosError::invalid_spec("interval must be at least 1"));
        }
        let start = checked(start, cap)?;
        let end = checked(end, cap)?;
        Ok(Mark::Seq(Seq::new(start, end, itv, cap)))
    }

    /// An explicit set of values, sorted and de-duplicated.
    pub fn enumerated(values: &[i64], cap: u32) -> ChronosResult<Self> {
        if values.is_empty() {
            return Err(ChronosError::invalid_spec("value list is empty"));
        }
        let mut marks = values
            .iter()
            .map(|v| checked(*v, cap))
            .collect::<ChronosResult<Vec<_>>>()?;
        marks.sort_unstable();
        marks.dedup();
        Ok(Mark::Enum { cap, marks })
    }

    /// Build a mark from a zero-based field spec; every value must fit the cycle.
    pub fn new(spec: &FieldSpec, cap: u32) -> ChronosResult<Self> {
        match spec {
            FieldSpec::Any => Mark::every(cap),
            FieldSpec::At(value) => Mark::solo(*value, cap),
            FieldSpec::Range { start, end, step } => Mark::seq(*start, *end, *step, cap),
            FieldSpec::List(values) => Mark::enumerated(values, cap),
        }
    }

    /// Build a mark for a cycle that may be shorter than the one the spec was
    /// written for, such as the days of February.
    ///
    /// Negative values count from the end of this cycle. Values past `cap` are
    /// dropped, and `None` is returned when nothing is left.
    pub fn fitted(spec: &FieldSpec, cap: u32) -> ChronosResult<Option<Self>> {
        let size = i64::from(cap) + 1;
        let in_cycle = |v: &i64| (0..size).contains(v);

        let values: Vec<i64> = match spec {
            FieldSpec::Any => return Mark::every(cap).map(Some),
            FieldSpec::At(value) => vec![normalize(*value, cap)],
            FieldSpec::Range { start, end, step } => {
                if *step == 0 {
                    return Err(ChronosError::invalid_spec("interval must be at least 1"));
                }
                let step = i64::from(*step);
                let start = normalize(*start, cap);
                let end = normalize(*end, cap);
                let mut values = Vec::new();
                if start <= end {
                    let mut value = start;
                    if value < 0 {
                        value += (step - 1 - value) / step * step;
                    }
                    while value <= end.min(size - 1) {
                        values.push(value);
                        value += step;
                    }
                } else {
                    // a start past this cycle's end keeps only the wrapped part
                    let mut value = start - size;
                    if value > 0 {
                        value %= step;
                    }
                    while value <= end.min(size - 1) {
                        values.push(if value < 0 { value + size } else { value });
                        value += step;
                    }
                }
                values
            }
            FieldSpec::List(values) => values.iter().map(|v| normalize(*v, cap)).collect(),
        };

        let values = values
            .into_iter()
            .filter(in_cycle)
            .map(|v| v as u32)
            .collect();
        Ok(Mark::compact(values, cap))
    }

    /// The subset of this mark within `lo..=hi`, on the same cycle.
    pub fn restrict(&self, lo: u32, hi: u32) -> Option<Self> {
        let values = self
            .marks()
            .into_iter()
            .filter(|v| (lo..=hi).contains(v))
            .collect();
        Mark::compact(values, self.cap())
    }

    /// Pick the tightest variant that represents `values`.
    fn compact(mut values: Vec<u32>, cap: u32) -> Option<Self> {
        values.sort_unstable();
        values.dedup();

        let (first, last) = match (values.first(), values.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return None,
        };
        if values.len() == 1 {
            return Some(Mark::Solo { cap, mark: first });
        }
        if values.len() as u64 == u64::from(cap) + 1 {
            return Some(Mark::Every { cap });
        }
        let itv = values[1] - values[0];
        if values.windows(2).all(|w| w[1] - w[0] == itv) {
            return Some(Mark::Seq(Seq::new(first, last, itv, cap)));
        }
        Some(Mark::Enum { cap, marks: values })
    }

    /// Largest value of the cycle.
    pub fn cap(&self) -> u32 {
        match self {
            Mark::Solo { cap, .. } | Mark::Every { cap } | Mark::Enum { cap, .. } => *cap,
            Mark::Seq(seq) => seq.cap,
        }
    }

    /// Number of valid values.
    pub fn count(&self) -> u64 {
        match self {
            Mark::Solo { .. } => 1,
            Mark::Every { cap } => u64::from(*cap) + 1,
            Mark::Seq(seq) => seq.count,
            Mark::Enum { marks, .. } => marks.len() as u64,
        }
    }

    /// The `i`-th valid value counting from zero, wrapping around the cycle.
    pub fn nth(&self, i: i64) -> u32 {
        let index = i.rem_euclid(self.count() as i64);
        match self {
            Mark::Solo { mark, .. } => *mark,
            Mark::Every { .. } => index as u32,
            Mark::Seq(seq) => seq.nth(index),
            Mark::Enum { marks, .. } => marks[index as usize],
        }
    }

    /// The `i`-th valid value counting back from the end, `last_nth(1)` being the last.
    pub fn last_nth(&self, i: i64) -> u32 {
        self.nth(self.count() as i64 - i)
    }

    /// Smallest valid value.
    pub fn first(&self) -> u32 {
        self.nth(0)
    }

    /// Largest valid value.
    pub fn last(&self) -> u32 {
        self.last_nth(1)
    }

    /// All valid values in ascending order.
    pub fn marks(&self) -> Vec<u32> {
        (0..self.count() as i64).map(|i| self.nth(i)).collect()
    }

    /// Returns true when `n` is a valid value.
    pub fn contains(&self, n: u32) -> bool {
        match self {
            Mark::Solo { mark, .. } => n == *mark,
            Mark::Every { cap } => n <= *cap,
            Mark::Seq(seq) => seq.contains(n),
            Mark::Enum { marks, .. } => marks.binary_search(&n).is_ok(),
        }
    }

    /// Number of valid values less than or equal to `n`.
    pub fn cost_behind(&self, n: u32) -> u64 {
        match self {
            Mark::Solo { mark, .. } => u64::from(n >= *mark),
            Mark::Every { cap } => u64::from(n.min(*cap)) + 1,
            Mark::Seq(seq) => seq.cost_behind(n),
            Mark::Enum { marks, .. } => marks.partition_point(|v| *v <= n) as u64,
        }
    }

    /// Number of valid values strictly greater than `n`.
    pub fn cost_ahead(&self, n: u32) -> u64 {
        self.count() - self.cost_behind(n)
    }

    /// Walk `leap` valid values forward from `n`.
    ///
    /// Returns the landing value and the number of times the walk passed the
    /// end of the cycle. When `n` is not valid, the first step lands on the
    /// first valid value after it. A zero leap stays on `n`.
    pub fn next(&self, n: u32, leap: u64) -> (u32, u64) {
        if leap == 0 {
            return (n, 0);
        }
        match self {
            Mark::Solo { mark, .. } => {
                let carry = if n >= *mark { leap } else { leap - 1 };
                (*mark, carry)
            }
            Mark::Every { cap } => {
                let count = i128::from(*cap) + 1;
                let n = i128::from(n.min(*cap));
                let leap = i128::from(leap);
                let dist = leap - i128::from(*cap) + n;
                let carry = if dist > 0 { 1 + (dist - 1) / count } else { 0 };
                (((n + leap) % count) as u32, carry as u64)
            }
            _ => {
                let count = i128::from(self.count());
                let index = i128::from(self.cost_behind(n)) - 1 + i128::from(leap);
                (
                    self.nth(index.rem_euclid(count) as i64),
                    index.div_euclid(count) as u64,
                )
            }
        }
    }

    /// Walk `leap` valid values backward from `n`.
    ///
    /// Mirror image of [`Mark::next`]; the second value counts how many
    /// times the walk passed the start of the cycle.
    pub fn prev(&self, n: u32, leap: u64) -> (u32, u64) {
        if leap == 0 {
            return (n, 0);
        }
        match self {
            Mark::Solo { mark, .. } => {
                let borrow = if n <= *mark { leap } else { leap - 1 };
                (*mark, borrow)
            }
            Mark::Every { cap } => {
                let count = i128::from(*cap) + 1;
                // a value past the cap sits one step above it
                let rev = i128::from(*cap) - i128::from(n.min(cap + 1));
                let leap = i128::from(leap);
                let dist = leap - i128::from(*cap) + rev;
                let borrow = if dist > 0 { 1 + (dist - 1) / count } else { 0 };
                (
                    (i128::from(*cap) - (rev + leap).rem_euclid(count)) as u32,
                    borrow as u64,
                )
            }
            _ => {
                let count = i128::from(self.count());
                let below = self.cost_behind(n) - u64::from(self.contains(n));
                let index = i128::from(below) - i128::from(leap);
                (
                    self.nth(index.rem_euclid(count) as i64),
                    (-index.div_euclid(count)) as u64,
                )
            }
        }
    }
}

/// Arithmetic progression over a cycle.
///
/// When `start > end` the progression crosses the zero point. It is then laid
/// out from `aux_start = start - cap - 1`, a negative position, so the whole
/// progression is one linear run; the `wrapped` leading terms are the ones that
/// fall before zero and live at the top of the cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seq {
    cap: u32,
    start: u32,
    end: u32,
    itv: u32,
    aux_start: i64,
    count: u64,
    wrapped: u64,
}

impl Seq {
    fn new(start: u32, end: u32, itv: u32, cap: u32) -> Self {
        let span = i64::from(cap) + 1;
        let step = i64::from(itv);
        let aux_start = if start > end {
            i64::from(start) - span
        } else {
            i64::from(start)
        };
        let count = ((i64::from(end) - aux_start) / step + 1) as u64;
        let wrapped = if aux_start < 0 {
            ((-aux_start + step - 1) / step) as u64
        } else {
            0
        };
        Self {
            cap,
            start,
            end,
            itv,
            aux_start,
            count,
            wrapped,
        }
    }

    /// Returns true when the progression crosses the cycle's zero point.
    pub fn cross_base(&self) -> bool {
        self.start > self.end
    }

    /// Distance from the progression's logical start to `n`.
    fn has_past(&self, n: u32) -> i64 {
        if self.cross_base() && n < self.start {
            i64::from(n) - self.aux_start
        } else {
            i64::from(n) - i64::from(self.start)
        }
    }

    fn contains(&self, n: u32) -> bool {
        let past = self.has_past(n);
        let step = i64::from(self.itv);
        past >= 0 && past % step == 0 && past / step < self.count as i64
    }

    fn nth(&self, index: i64) -> u32 {
        let step = i64::from(self.itv);
        let wrapped = self.wrapped as i64;
        let low = self.count as i64 - wrapped;
        if index < low {
            (self.aux_start + (wrapped + index) * step) as u32
        } else {
            (self.aux_start + (index - low) * step + i64::from(self.cap) + 1) as u32
        }
    }

    fn cost_behind(&self, n: u32) -> u64 {
        let n = i64::from(n);
        let step = i64::from(self.itv);
        let count = self.count as i64;
        let wrapped = self.wrapped as i64;

        // terms inside 0..=end
        let reach = (n - self.aux_start).div_euclid(step).min(count - 1);
        let low = (reach - wrapped + 1).max(0);

        // terms that crossed zero and sit at the top of the cycle
        let span = i64::from(self.cap) + 1;
        let high = ((n - span - self.aux_start).div_euclid(step) + 1).clamp(0, wrapped);

        (low + high) as u64
    }
}
