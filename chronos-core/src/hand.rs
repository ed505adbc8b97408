//! Clock hands.

use crate::error::ChronosResult;
use crate::mark::Mark;
use crate::spec::{FieldKind, FieldSpec};

/// Which clock field a hand tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandKind {
    Hour,
    Minute,
    Second,
}

impl HandKind {
    fn field(self) -> FieldKind {
        match self {
            HandKind::Hour => FieldKind::HOUR,
            HandKind::Minute => FieldKind::MINUTE,
            HandKind::Second => FieldKind::SECOND,
        }
    }

    /// Largest value of the hand's cycle.
    pub fn cap(self) -> u32 {
        self.field().cap
    }
}

/// One clock field and its valid values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    kind: HandKind,
    mark: Mark,
}

impl Hand {
    pub fn new(kind: HandKind, spec: &FieldSpec) -> ChronosResult<Self> {
        let spec = kind.field().to_domain(spec)?;
        let mark = Mark::new(&spec, kind.cap())?;
        Ok(Self { kind, mark })
    }

    pub fn hour(spec: &FieldSpec) -> ChronosResult<Self> {
        Self::new(HandKind::Hour, spec)
    }

    pub fn minute(spec: &FieldSpec) -> ChronosResult<Self> {
        Self::new(HandKind::Minute, spec)
    }

    pub fn second(spec: &FieldSpec) -> ChronosResult<Self> {
        Self::new(HandKind::Second, spec)
    }

    pub fn cap(&self) -> u32 {
        self.kind.cap()
    }

    pub fn mark(&self) -> &Mark {
        &self.mark
    }

    pub fn contains(&self, n: u32) -> bool {
        self.mark.contains(n)
    }

    pub fn next(&self, n: u32, leap: u64) -> (u32, u64) {
        self.mark.next(n, leap)
    }

    pub fn prev(&self, n: u32, leap: u64) -> (u32, u64) {
        self.mark.prev(n, leap)
    }

    pub fn first(&self) -> u32 {
        self.mark.first()
    }

    pub fn last(&self) -> u32 {
        self.mark.last()
    }
}
