//! Stacks of calendar levels.
//!
//! A [`Calendar`] walks a stack of [`Node`]s the way a [`Clock`](crate::Clock)
//! walks its hands, except that the radix of each level depends on the levels
//! above it. A carry out of the day level can therefore not be turned into a
//! month count up front; it is consumed one parent cycle at a time.

use crate::error::{ChronosError, ChronosResult};
use crate::fields::DateFields;
use crate::mark::Mark;
use crate::mode::Mode;
use crate::node::Node;
use crate::spec::FieldSpec;
use tracing::trace;

/// Calendar side of a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    mode: Mode,
    nodes: Vec<Node>,
}

impl Calendar {
    /// Build from one spec per calendar field of `mode`, most-significant first.
    ///
    /// Specs use the field's natural numbering; see [`FieldSpec`].
    pub fn new(mode: Mode, specs: &[FieldSpec]) -> ChronosResult<Self> {
        if specs.len() != mode.depth() {
            return Err(ChronosError::invalid_spec(format!(
                "{} calendar takes {} fields, got {}",
                mode,
                mode.depth(),
                specs.len()
            )));
        }

        let domain = mode
            .fields()
            .iter()
            .zip(specs)
            .map(|(kind, spec)| kind.to_domain(spec))
            .collect::<ChronosResult<Vec<_>>>()?;

        let nodes = match (mode, domain.as_slice()) {
            (Mode::Day, [year, day]) => vec![Node::year(year)?, Node::day_of_year(day)?],
            (Mode::Month, [year, month, day]) => vec![
                Node::year(year)?,
                Node::month(month)?,
                Node::day_of_month(day)?,
            ],
            (Mode::Week, [year, week, weekday]) => vec![
                Node::year(year)?,
                Node::week_of_year(week)?,
                Node::day_of_week(weekday)?,
            ],
            (Mode::MonthWeek, [year, month, week, weekday]) => vec![
                Node::year(year)?,
                Node::month(month)?,
                Node::week_of_month(week)?,
                Node::weekday_of_row(weekday)?,
            ],
            _ => {
                return Err(ChronosError::invalid_spec(format!(
                    "{} calendar fields do not match the mode",
                    mode
                )));
            }
        };

        Ok(Self { mode, nodes })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        self.nodes.len()
    }

    /// The mark that applies to `level` given the levels above it in `date`.
    ///
    /// `None` when `level` is past the leaf or the applicable child is void.
    pub fn mark_at<'a>(&'a self, level: usize, date: &DateFields) -> Option<&'a Mark> {
        self.nodes.get(level)?.resolve(date.prefix(level))
    }

    /// Returns true when every level accepts its value.
    pub fn contains(&self, date: &DateFields) -> bool {
        date.len() == self.depth() && self.first_invalid(date).is_none()
    }

    /// Snap forward to the first valid date after an invalid one.
    ///
    /// Returns the landing date and whether a snap happened. A valid date is
    /// returned unchanged.
    pub fn reset_next(&self, date: &DateFields) -> ChronosResult<(DateFields, bool)> {
        self.check_depth(date)?;
        let mut landing = *date;
        let Some(level) = self.first_invalid(date) else {
            return Ok((landing, false));
        };
        trace!(mode = %self.mode, date = %date, level, "calendar reset forward");
        self.advance(&mut landing, level)
            .map_err(ChronosError::settle)?;
        Ok((landing, true))
    }

    /// Snap backward to the last valid date before an invalid one.
    pub fn reset_prev(&self, date: &DateFields) -> ChronosResult<(DateFields, bool)> {
        self.check_depth(date)?;
        let mut landing = *date;
        let Some(level) = self.first_invalid(date) else {
            return Ok((landing, false));
        };
        trace!(mode = %self.mode, date = %date, level, "calendar reset backward");
        self.retreat(&mut landing, level)
            .map_err(ChronosError::settle)?;
        Ok((landing, true))
    }

    /// Walk `leap` valid dates forward.
    ///
    /// From an invalid date the first step lands on the first valid date
    /// after it. Fails with [`ChronosError::Inadequate`] when the walk runs
    /// past the last supported year.
    pub fn next(&self, date: &DateFields, leap: u64) -> ChronosResult<DateFields> {
        self.check_depth(date)?;
        self.walk_forward(date, leap).map_err(ChronosError::settle)
    }

    /// Walk `leap` valid dates backward.
    pub fn prev(&self, date: &DateFields, leap: u64) -> ChronosResult<DateFields> {
        self.check_depth(date)?;
        self.walk_backward(date, leap).map_err(ChronosError::settle)
    }

    fn check_depth(&self, date: &DateFields) -> ChronosResult<()> {
        if date.len() != self.depth() {
            return Err(ChronosError::out_of_range(format!(
                "{} calendar takes {} fields, got {}",
                self.mode,
                self.depth(),
                date.len()
            )));
        }
        Ok(())
    }

    fn first_invalid(&self, date: &DateFields) -> Option<usize> {
        (0..self.depth()).find(|level| {
            !self
                .mark_at(*level, date)
                .is_some_and(|mark| mark.contains(date.get(*level)))
        })
    }

    fn walk_forward(&self, date: &DateFields, leap: u64) -> ChronosResult<DateFields> {
        let mut landing = *date;
        let mut remaining = leap;
        if remaining == 0 {
            return Ok(landing);
        }
        if let Some(level) = self.first_invalid(&landing) {
            self.advance(&mut landing, level)?;
            remaining -= 1;
        }

        let leaf = self.depth() - 1;
        loop {
            let mark = self
                .mark_at(leaf, &landing)
                .ok_or(ChronosError::Indecisive { level: leaf })?;
            let value = landing.get(leaf);
            let ahead = mark.cost_ahead(value);
            if remaining <= ahead {
                landing.set(leaf, mark.next(value, remaining).0);
                trace!(mode = %self.mode, from = %date, to = %landing, leap, "calendar step forward");
                return Ok(landing);
            }
            remaining -= ahead + 1;
            self.advance(&mut landing, leaf - 1)?;
        }
    }

    fn walk_backward(&self, date: &DateFields, leap: u64) -> ChronosResult<DateFields> {
        let mut landing = *date;
        let mut remaining = leap;
        if remaining == 0 {
            return Ok(landing);
        }
        if let Some(level) = self.first_invalid(&landing) {
            self.retreat(&mut landing, level)?;
            remaining -= 1;
        }

        let leaf = self.depth() - 1;
        loop {
            let mark = self
                .mark_at(leaf, &landing)
                .ok_or(ChronosError::Indecisive { level: leaf })?;
            let value = landing.get(leaf);
            let behind = mark.cost_behind(value) - u64::from(mark.contains(value));
            if remaining <= behind {
                landing.set(leaf, mark.prev(value, remaining).0);
                trace!(mode = %self.mode, from = %date, to = %landing, leap, "calendar step backward");
                return Ok(landing);
            }
            remaining -= behind + 1;
            self.retreat(&mut landing, leaf - 1)?;
        }
    }

    /// Move `level` to its next valid value, carrying into the levels above
    /// when it wraps, and fill the levels below with their first valid values.
    fn advance(&self, date: &mut DateFields, level: usize) -> ChronosResult<()> {
        let mut level = level;
        loop {
            let stepped = self.mark_at(level, date).and_then(|mark| {
                let (value, carry) = mark.next(date.get(level), 1);
                (carry == 0).then_some(value)
            });
            match stepped {
                Some(value) => {
                    date.set(level, value);
                    if self.descend_first(date, level + 1) {
                        return Ok(());
                    }
                }
                None if level == 0 => return Err(ChronosError::Indecisive { level }),
                None => level -= 1,
            }
        }
    }

    /// Mirror of [`Calendar::advance`]; lower levels get their last valid values.
    fn retreat(&self, date: &mut DateFields, level: usize) -> ChronosResult<()> {
        let mut level = level;
        loop {
            let stepped = self.mark_at(level, date).and_then(|mark| {
                let (value, borrow) = mark.prev(date.get(level), 1);
                (borrow == 0).then_some(value)
            });
            match stepped {
                Some(value) => {
                    date.set(level, value);
                    if self.descend_last(date, level + 1) {
                        return Ok(());
                    }
                }
                None if level == 0 => return Err(ChronosError::Indecisive { level }),
                None => level -= 1,
            }
        }
    }

    /// Set `level` and everything below it to the earliest valid values under
    /// the current prefix. False when some child on the way is void.
    fn descend_first(&self, date: &mut DateFields, level: usize) -> bool {
        if level == self.depth() {
            return true;
        }
        let Some(mark) = self.mark_at(level, date) else {
            return false;
        };
        for i in 0..mark.count() as i64 {
            date.set(level, mark.nth(i));
            if self.descend_first(date, level + 1) {
                return true;
            }
        }
        false
    }

    fn descend_last(&self, date: &mut DateFields, level: usize) -> bool {
        if level == self.depth() {
            return true;
        }
        let Some(mark) = self.mark_at(level, date) else {
            return false;
        };
        for i in 1..=mark.count() as i64 {
            date.set(level, mark.last_nth(i));
            if self.descend_last(date, level + 1) {
                return true;
            }
        }
        false
    }
}
