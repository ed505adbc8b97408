//! Time-of-day arithmetic over three hands.
//!
//! The clock is a three-digit mixed-radix counter whose digits are the valid
//! values of each hand. Every hour has the same valid minutes and every minute
//! the same valid seconds, so a carry out of one hand is exactly the leap the
//! next hand must take, and the carry out of the hour hand is the number of
//! days the calendar must advance.

use crate::error::{ChronosError, ChronosResult};
use crate::fields::TimeFields;
use crate::hand::Hand;
use crate::spec::FieldSpec;

/// Hour, minute and second hands, most-significant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    hands: [Hand; 3],
}

impl Clock {
    /// Build from `[hour, minute, second]` specs.
    pub fn new(specs: &[FieldSpec]) -> ChronosResult<Self> {
        let [hour, minute, second] = specs else {
            return Err(ChronosError::invalid_spec(format!(
                "clock takes 3 fields (hour, minute, second), got {}",
                specs.len()
            )));
        };
        Ok(Self::from_hands(
            Hand::hour(hour)?,
            Hand::minute(minute)?,
            Hand::second(second)?,
        ))
    }

    pub fn from_hands(hour: Hand, minute: Hand, second: Hand) -> Self {
        Self {
            hands: [hour, minute, second],
        }
    }

    /// Returns true when every hand accepts its field.
    pub fn contains(&self, time: &TimeFields) -> bool {
        self.hands
            .iter()
            .enumerate()
            .all(|(i, hand)| hand.contains(time.get(i)))
    }

    /// Earliest valid time of day.
    pub fn first(&self) -> TimeFields {
        TimeFields::new(
            self.hands[0].first(),
            self.hands[1].first(),
            self.hands[2].first(),
        )
    }

    /// Latest valid time of day.
    pub fn last(&self) -> TimeFields {
        TimeFields::new(
            self.hands[0].last(),
            self.hands[1].last(),
            self.hands[2].last(),
        )
    }

    /// Step a valid time `leap` matches forward.
    ///
    /// Returns the new time and the number of days crossed.
    pub fn next(&self, time: &TimeFields, leap: u64) -> (TimeFields, u64) {
        self.carry_from(*time, TimeFields::SECOND, leap)
    }

    /// Step a valid time `leap` matches backward.
    ///
    /// Returns the new time and the number of days crossed.
    pub fn prev(&self, time: &TimeFields, leap: u64) -> (TimeFields, u64) {
        self.borrow_from(*time, TimeFields::SECOND, leap)
    }

    /// Snap forward to the first valid time after an invalid field.
    ///
    /// Finds the most significant field its hand rejects, moves it to the
    /// hand's next valid value and sets every less significant field to its
    /// first valid value. With `force`, a fully valid time is treated as
    /// lying just past itself. Returns the landing time, 1 if a snap happened
    /// (0 otherwise) and the days carried out of the hour hand.
    pub fn reset_next(&self, time: &TimeFields, force: bool) -> (TimeFields, u64, u64) {
        let offending = self
            .offending(time)
            .or(if force { Some(TimeFields::SECOND) } else { None });
        let Some(index) = offending else {
            return (*time, 0, 0);
        };

        let (mut landing, carry) = self.carry_from(*time, index, 1);
        for below in index + 1..3 {
            landing.set(below, self.hands[below].first());
        }
        (landing, 1, carry)
    }

    /// Snap backward to the last valid time before an invalid field.
    ///
    /// Mirror image of [`Clock::reset_next`]; less significant fields go to
    /// their last valid value. With `force`, a fully valid time is its own
    /// landing point but still counts as a snap.
    pub fn reset_prev(&self, time: &TimeFields, force: bool) -> (TimeFields, u64, u64) {
        let Some(index) = self.offending(time) else {
            return (*time, u64::from(force), 0);
        };

        let (mut landing, borrow) = self.borrow_from(*time, index, 1);
        for below in index + 1..3 {
            landing.set(below, self.hands[below].last());
        }
        (landing, 1, borrow)
    }

    fn offending(&self, time: &TimeFields) -> Option<usize> {
        (0..3).find(|i| !self.hands[*i].contains(time.get(*i)))
    }

    /// Step the hand at `index` and feed carries into the hands above it.
    fn carry_from(&self, mut time: TimeFields, index: usize, leap: u64) -> (TimeFields, u64) {
        let mut carry = leap;
        for i in (0..=index).rev() {
            if carry == 0 {
                break;
            }
            let (value, over) = self.hands[i].next(time.get(i), carry);
            time.set(i, value);
            carry = over;
        }
        (time, carry)
    }

    fn borrow_from(&self, mut time: TimeFields, index: usize, leap: u64) -> (TimeFields, u64) {
        let mut borrow = leap;
        for i in (0..=index).rev() {
            if borrow == 0 {
                break;
            }
            let (value, under) = self.hands[i].prev(time.get(i), borrow);
            time.set(i, value);
            borrow = under;
        }
        (time, borrow)
    }
}
