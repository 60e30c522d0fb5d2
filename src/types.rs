//! Core types: Partition, IndexSet

use std::fmt;
use std::ops::RangeInclusive;

use rustc_hash::FxHashSet;

use crate::error::{Result, SplitError};

/// Ascending, duplicate-free positions into a timeline.
pub type IndexSet = Vec<usize>;

/// A disjoint `(train, test)` pair of index sets over one timeline.
///
/// Splitters build partitions fresh on every call; leakage guards consume
/// one and return a new one. Nothing mutates a partition after it has been
/// handed out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partition {
    pub train: IndexSet,
    pub test: IndexSet,
}

impl Partition {
    pub fn new(train: IndexSet, test: IndexSet) -> Self {
        Self { train, test }
    }

    /// Build a partition from two contiguous half-open ranges.
    pub fn from_ranges(train: std::ops::Range<usize>, test: std::ops::Range<usize>) -> Self {
        Self {
            train: train.collect(),
            test: test.collect(),
        }
    }

    pub fn into_parts(self) -> (IndexSet, IndexSet) {
        (self.train, self.test)
    }

    pub fn is_empty(&self) -> bool {
        self.train.is_empty() && self.test.is_empty()
    }

    /// Smallest and largest train position, `None` if train is empty.
    pub fn train_span(&self) -> Option<RangeInclusive<usize>> {
        span(&self.train)
    }

    /// Smallest and largest test position, `None` if test is empty.
    pub fn test_span(&self) -> Option<RangeInclusive<usize>> {
        span(&self.test)
    }

    /// Every train position is strictly below every test position.
    ///
    /// Vacuously true when either side is empty.
    pub fn is_chronological(&self) -> bool {
        match (self.train_span(), self.test_span()) {
            (Some(train), Some(test)) => train.end() < test.start(),
            _ => true,
        }
    }

    pub fn is_disjoint(&self) -> bool {
        self.first_shared().is_none()
    }

    /// Check the partition against a timeline of length `len`.
    ///
    /// Fails on the first out-of-range position, then on the first
    /// position present on both sides.
    pub fn validate(&self, len: usize) -> Result<()> {
        if let Some(&index) = self.train.iter().chain(&self.test).find(|&&i| i >= len) {
            return Err(SplitError::IndexOutOfRange { index, len });
        }
        if let Some(index) = self.first_shared() {
            return Err(SplitError::NotDisjoint { index });
        }
        Ok(())
    }

    fn first_shared(&self) -> Option<usize> {
        if self.is_chronological() {
            return None;
        }
        let train: FxHashSet<usize> = self.train.iter().copied().collect();
        self.test.iter().copied().find(|i| train.contains(i))
    }
}

impl From<(IndexSet, IndexSet)> for Partition {
    fn from((train, test): (IndexSet, IndexSet)) -> Self {
        Self { train, test }
    }
}

impl From<Partition> for (IndexSet, IndexSet) {
    fn from(p: Partition) -> Self {
        (p.train, p.test)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "train=")?;
        write_side(f, &self.train)?;
        write!(f, " test=")?;
        write_side(f, &self.test)
    }
}

fn write_side(f: &mut fmt::Formatter<'_>, side: &[usize]) -> fmt::Result {
    match span(side) {
        None => write!(f, "[]"),
        Some(r) if r.end() - r.start() + 1 == side.len() && is_sorted(side) => {
            write!(f, "[{}..{}]", r.start(), r.end() + 1)
        }
        Some(_) => write!(f, "{{{} indices}}", side.len()),
    }
}

fn span(side: &[usize]) -> Option<RangeInclusive<usize>> {
    let lo = side.iter().min()?;
    let hi = side.iter().max()?;
    Some(*lo..=*hi)
}

fn is_sorted(side: &[usize]) -> bool {
    side.windows(2).all(|w| w[0] < w[1])
}
