//! Calendar levels.
//!
//! A [`Node`] is one level of a calendar stack. The valid values of a level
//! depend on the levels above it: the days of a month depend on which month
//! and, for February, on the year. A node therefore owns one child per
//! structurally different cycle, built once from the same field spec, and a
//! pure dispatch ([`Node::which_node`]) that picks the child for a given
//! prefix of the date.
//!
//! A child is `Void` when the spec has no value inside that child's cycle,
//! e.g. "day 31" for a 30-day month. Dates under such a prefix never match.

use crate::error::ChronosResult;
use crate::gregorian;
use crate::mark::Mark;
use crate::spec::{FieldKind, FieldSpec, YEAR_MIN};

/// Candidate owned by a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Mark(Mark),
    Node(Box<Node>),
    Void,
}

impl Child {
    fn fitted(spec: &FieldSpec, cap: u32) -> ChronosResult<Self> {
        Ok(Mark::fitted(spec, cap)?.map_or(Child::Void, Child::Mark))
    }

    fn from_mark(mark: Option<Mark>) -> Self {
        mark.map_or(Child::Void, Child::Mark)
    }
}

/// Which child a dispatch picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminant {
    /// Levels with a single cycle
    Single,
    /// Month of 30 days
    ShortMonth,
    /// Month of 31 days
    LongMonth,
    February,
    CommonYear,
    LeapYear,
    /// ISO year of 52 weeks
    ShortWeekYear,
    /// ISO year of 53 weeks
    LongWeekYear,
    /// Month spanning the given number of week rows
    Rows(u32),
    /// Week row with all seven days inside the month
    FullRow,
    /// First row of a month starting on the given weekday
    HeadRow(u32),
    /// Last row of a month ending on the given weekday
    TailRow(u32),
}

/// One level of a calendar stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Absolute year.
    Year(Child),

    /// Month of the year.
    Month(Child),

    /// Day of the month, by month length.
    DayOfMonth {
        generic: Child,
        long: Child,
        february: Child,
    },

    /// Day of February, by leap year.
    February { common: Child, leap: Child },

    /// Day of the year, by leap year.
    DayOfYear { common: Child, leap: Child },

    /// ISO week of the ISO week-year, by number of weeks.
    WeekOfYear { short: Child, long: Child },

    /// Week row of the month, by how many rows the month spans (4, 5 or 6).
    WeekOfMonth { rows: [Child; 3] },

    /// Day of an ISO week.
    DayOfWeek(Child),

    /// Day within a week row of a month. The first and last rows are
    /// partial, so each possible starting (ending) weekday has its own child.
    WeekdayOfRow {
        full: Child,
        head: Vec<Child>,
        tail: Vec<Child>,
    },
}

impl Node {
    /// Year level over `YEAR_MIN..=YEAR_MAX`; the spec is zero-based.
    pub fn year(spec: &FieldSpec) -> ChronosResult<Self> {
        Ok(Node::Year(Child::Mark(Mark::new(spec, FieldKind::YEAR.cap)?)))
    }

    pub fn month(spec: &FieldSpec) -> ChronosResult<Self> {
        Ok(Node::Month(Child::Mark(Mark::new(spec, 11)?)))
    }

    pub fn day_of_month(spec: &FieldSpec) -> ChronosResult<Self> {
        Ok(Node::DayOfMonth {
            generic: Child::fitted(spec, 29)?,
            long: Child::fitted(spec, 30)?,
            february: Child::Node(Box::new(Node::February {
                common: Child::fitted(spec, 27)?,
                leap: Child::fitted(spec, 28)?,
            })),
        })
    }

    pub fn day_of_year(spec: &FieldSpec) -> ChronosResult<Self> {
        Ok(Node::DayOfYear {
            common: Child::fitted(spec, 364)?,
            leap: Child::fitted(spec, 365)?,
        })
    }

    pub fn week_of_year(spec: &FieldSpec) -> ChronosResult<Self> {
        Ok(Node::WeekOfYear {
            short: Child::fitted(spec, 51)?,
            long: Child::fitted(spec, 52)?,
        })
    }

    pub fn week_of_month(spec: &FieldSpec) -> ChronosResult<Self> {
        Ok(Node::WeekOfMonth {
            rows: [
                Child::fitted(spec, 3)?,
                Child::fitted(spec, 4)?,
                Child::fitted(spec, 5)?,
            ],
        })
    }

    pub fn day_of_week(spec: &FieldSpec) -> ChronosResult<Self> {
        Ok(Node::DayOfWeek(Child::Mark(Mark::new(spec, 6)?)))
    }

    pub fn weekday_of_row(spec: &FieldSpec) -> ChronosResult<Self> {
        let base = Mark::new(spec, 6)?;
        let head = (0..7).map(|w| Child::from_mark(base.restrict(w, 6))).collect();
        let tail = (0..7).map(|w| Child::from_mark(base.restrict(0, w))).collect();
        Ok(Node::WeekdayOfRow {
            full: Child::Mark(base),
            head,
            tail,
        })
    }

    /// Pick the child that applies under `prefix`, the zero-based values of
    /// the levels above this one.
    pub fn which_node(&self, prefix: &[u32]) -> (&Child, Discriminant) {
        match self {
            Node::Year(child) | Node::Month(child) | Node::DayOfWeek(child) => {
                (child, Discriminant::Single)
            }
            Node::DayOfMonth {
                generic,
                long,
                february,
            } => {
                let month = month_of(prefix);
                if month == 2 {
                    (february, Discriminant::February)
                } else if gregorian::days_in_month(year_of(prefix), month) == 31 {
                    (long, Discriminant::LongMonth)
                } else {
                    (generic, Discriminant::ShortMonth)
                }
            }
            Node::February { common, leap } | Node::DayOfYear { common, leap } => {
                if gregorian::is_leap_year(year_of(prefix)) {
                    (leap, Discriminant::LeapYear)
                } else {
                    (common, Discriminant::CommonYear)
                }
            }
            Node::WeekOfYear { short, long } => {
                if gregorian::iso_weeks_in_year(year_of(prefix)) == 53 {
                    (long, Discriminant::LongWeekYear)
                } else {
                    (short, Discriminant::ShortWeekYear)
                }
            }
            Node::WeekOfMonth { rows } => {
                let count = gregorian::week_rows(year_of(prefix), month_of(prefix));
                (&rows[(count.clamp(4, 6) - 4) as usize], Discriminant::Rows(count))
            }
            Node::WeekdayOfRow { full, head, tail } => {
                let year = year_of(prefix);
                let month = month_of(prefix);
                let row = prefix.get(2).copied().unwrap_or(0);
                let days = gregorian::days_in_month(year, month);
                let opening = gregorian::weekday(year, month, 1);
                let closing = gregorian::weekday(year, month, days);
                let rows = gregorian::week_rows(year, month);
                if row == 0 && opening > 0 {
                    (&head[opening as usize], Discriminant::HeadRow(opening))
                } else if row + 1 == rows && closing < 6 {
                    (&tail[closing as usize], Discriminant::TailRow(closing))
                } else {
                    (full, Discriminant::FullRow)
                }
            }
        }
    }

    /// The mark that applies under `prefix`, following nested nodes.
    /// `None` when the applicable child is void.
    pub fn resolve(&self, prefix: &[u32]) -> Option<&Mark> {
        match self.which_node(prefix).0 {
            Child::Mark(mark) => Some(mark),
            Child::Node(node) => node.resolve(prefix),
            Child::Void => None,
        }
    }
}

fn year_of(prefix: &[u32]) -> i32 {
    YEAR_MIN + prefix.first().copied().unwrap_or(0) as i32
}

fn month_of(prefix: &[u32]) -> u32 {
    prefix.get(1).copied().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix(year: i32, month: u32) -> Vec<u32> {
        vec![(year - YEAR_MIN) as u32, month - 1]
    }

    #[test]
    fn test_day_of_month_dispatch() {
        let node = Node::day_of_month(&FieldSpec::Any).unwrap();
        assert_eq!(node.which_node(&prefix(2023, 1)).1, Discriminant::LongMonth);
        assert_eq!(node.which_node(&prefix(2023, 4)).1, Discriminant::ShortMonth);
        assert_eq!(node.which_node(&prefix(2023, 2)).1, Discriminant::February);

        assert_eq!(node.resolve(&prefix(2023, 2)).unwrap().cap(), 27);
        assert_eq!(node.resolve(&prefix(2024, 2)).unwrap().cap(), 28);
        assert_eq!(node.resolve(&prefix(2024, 4)).unwrap().cap(), 29);
        assert_eq!(node.resolve(&prefix(2024, 12)).unwrap().cap(), 30);
    }

    #[test]
    fn test_void_children() {
        let node = Node::day_of_month(&FieldSpec::At(30)).unwrap();
        assert!(node.resolve(&prefix(2023, 4)).is_none());
        assert!(node.resolve(&prefix(2024, 2)).is_none());
        assert!(node.resolve(&prefix(2023, 5)).is_some());
    }

    #[test]
    fn test_last_day_of_month() {
        let node = Node::day_of_month(&FieldSpec::At(-1)).unwrap();
        assert_eq!(node.resolve(&prefix(2023, 2)).unwrap().marks(), vec![27]);
        assert_eq!(node.resolve(&prefix(2024, 2)).unwrap().marks(), vec![28]);
        assert_eq!(node.resolve(&prefix(2024, 6)).unwrap().marks(), vec![29]);
    }

    #[test]
    fn test_week_of_year_dispatch() {
        let node = Node::week_of_year(&FieldSpec::At(-1)).unwrap();
        let (_, kind) = node.which_node(&prefix(2020, 1)[..1]);
        assert_eq!(kind, Discriminant::LongWeekYear);
        assert_eq!(node.resolve(&prefix(2020, 1)[..1]).unwrap().marks(), vec![52]);
        assert_eq!(node.resolve(&prefix(2021, 1)[..1]).unwrap().marks(), vec![51]);
    }

    #[test]
    fn test_weekday_of_row_dispatch() {
        let node = Node::weekday_of_row(&FieldSpec::Any).unwrap();
        // May 2021 opens on a Saturday and closes on a Monday
        let mut p = prefix(2021, 5);
        p.push(0);
        assert_eq!(node.which_node(&p).1, Discriminant::HeadRow(5));
        assert_eq!(node.resolve(&p).unwrap().marks(), vec![5, 6]);
        p[2] = 5;
        assert_eq!(node.which_node(&p).1, Discriminant::TailRow(0));
        assert_eq!(node.resolve(&p).unwrap().marks(), vec![0]);
        p[2] = 2;
        assert_eq!(node.which_node(&p).1, Discriminant::FullRow);
    }

    #[test]
    fn test_week_of_month_dispatch() {
        let node = Node::week_of_month(&FieldSpec::At(-1)).unwrap();
        assert_eq!(node.which_node(&prefix(2021, 2)).1, Discriminant::Rows(4));
        assert_eq!(node.resolve(&prefix(2021, 2)).unwrap().marks(), vec![3]);
        assert_eq!(node.resolve(&prefix(2021, 5)).unwrap().marks(), vec![5]);
    }
}
