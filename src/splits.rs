//! Chronological splitters.
//!
//! - [`naive_time_split`] cuts a timeline at a single instant.
//! - [`walk_forward_splits`] rolls fixed-size train/test windows through the
//!   timeline in index space, lazily.
//! - [`WalkForward::anchored`] keeps the train window pinned at position 0
//!   and lets it grow instead.
//!
//! Splitters never apply embargo or purge themselves; pass their output
//! through [`crate::leakage`] or a [`crate::LeakageGuard`].

use std::iter::FusedIterator;

use log::{debug, trace};

use crate::error::{Result, SplitError};
use crate::types::Partition;

// ---------------------------------------------------------------------------
// Naive split
// ---------------------------------------------------------------------------

/// Split a timeline at `train_end`.
///
/// Position `i` goes to train iff `times[i] < train_end`, otherwise to test.
/// `times` need not be sorted; both sides list positions in ascending order.
/// Either side may come back empty.
///
/// # Example
///
/// ```
/// use wfvkit::naive_time_split;
///
/// let times = [1, 2, 3, 4];
/// let p = naive_time_split(&times, &3);
/// assert_eq!(p.train, vec![0, 1]);
/// assert_eq!(p.test, vec![2, 3]);
/// ```
pub fn naive_time_split<T: PartialOrd>(times: &[T], train_end: &T) -> Partition {
    let mut train = Vec::new();
    let mut test = Vec::new();

    for (i, t) in times.iter().enumerate() {
        if t < train_end {
            train.push(i);
        } else {
            test.push(i);
        }
    }

    debug!(
        "naive split over {} points: {} train, {} test",
        times.len(),
        train.len(),
        test.len()
    );
    Partition { train, test }
}

// ---------------------------------------------------------------------------
// Walk-forward
// ---------------------------------------------------------------------------

/// How the train window moves between consecutive walk-forward splits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WindowMode {
    /// Fixed-length train window sliding forward by `step`.
    #[default]
    Rolling,
    /// Train window always starts at position 0 and grows by `step`.
    Anchored,
}

/// Lazy walk-forward partition sequence.
///
/// Split `k` (0-based) uses `start = k * step` and covers
///
/// - train `[start, start + train_size)` (rolling) or `[0, start + train_size)` (anchored)
/// - test `[start + train_size, start + train_size + test_size)`
///
/// The sequence ends at the first split whose test window would run past the
/// timeline; incomplete windows are never emitted. Cloning an unstarted
/// iterator, or building a new one with the same arguments, replays the same
/// sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkForward {
    len: usize,
    train_size: usize,
    test_size: usize,
    step: usize,
    embargo: usize,
    mode: WindowMode,
    start: usize,
    done: bool,
}

impl WalkForward {
    /// Rolling walk-forward over a timeline of `len` points.
    pub fn new(len: usize, train_size: usize, test_size: usize, step: usize) -> Result<Self> {
        Self::build(len, train_size, test_size, step, 0, WindowMode::Rolling)
    }

    /// Anchored (expanding-train) walk-forward over `len` points.
    ///
    /// Test windows and split count are identical to [`WalkForward::new`].
    pub fn anchored(len: usize, train_size: usize, test_size: usize, step: usize) -> Result<Self> {
        Self::build(len, train_size, test_size, step, 0, WindowMode::Anchored)
    }

    fn build(
        len: usize,
        train_size: usize,
        test_size: usize,
        step: usize,
        embargo: usize,
        mode: WindowMode,
    ) -> Result<Self> {
        validate_sizes(train_size, test_size, step)?;
        let wf = Self {
            len,
            train_size,
            test_size,
            step,
            embargo,
            mode,
            start: 0,
            done: false,
        };
        debug!(
            "walk-forward {:?}: len={len} train={train_size} test={test_size} step={step} -> {} splits",
            mode,
            wf.len()
        );
        Ok(wf)
    }

    /// Embargo requested by the caller.
    ///
    /// Recorded for the benefit of downstream guards; the iterator itself
    /// never removes indices.
    pub fn embargo(&self) -> usize {
        self.embargo
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    /// Total number of splits for these parameters, independent of progress.
    pub fn total_splits(&self) -> usize {
        split_count(self.len, self.train_size, self.test_size, self.step)
    }

    fn remaining(&self) -> usize {
        if self.done {
            return 0;
        }
        let Some(window) = self.train_size.checked_add(self.test_size) else {
            return 0;
        };
        match self.len.checked_sub(self.start) {
            Some(rest) if rest >= window => (rest - window) / self.step + 1,
            _ => 0,
        }
    }
}

impl Iterator for WalkForward {
    type Item = Partition;

    fn next(&mut self) -> Option<Partition> {
        if self.done {
            return None;
        }

        let test_end = self
            .start
            .checked_add(self.train_size)
            .and_then(|e| e.checked_add(self.test_size));
        let Some(test_end) = test_end.filter(|&e| e <= self.len) else {
            trace!("walk-forward exhausted at start={}", self.start);
            self.done = true;
            return None;
        };

        let train_end = self.start + self.train_size;
        let train_start = match self.mode {
            WindowMode::Rolling => self.start,
            WindowMode::Anchored => 0,
        };
        let split = Partition::from_ranges(train_start..train_end, train_end..test_end);

        match self.start.checked_add(self.step) {
            Some(next) => self.start = next,
            None => self.done = true,
        }
        Some(split)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for WalkForward {}

impl FusedIterator for WalkForward {}

/// Rolling walk-forward splits over `times`.
///
/// Only `times.len()` is consulted: windows live in index space and index
/// order is taken to be chronological order. Parameters are checked before
/// anything is produced; `embargo` is carried on the returned iterator but
/// not applied.
///
/// # Errors
///
/// [`SplitError::InvalidParameter`] if `train_size`, `test_size` or `step`
/// is zero.
///
/// # Example
///
/// ```
/// use wfvkit::walk_forward_splits;
///
/// let times: Vec<u32> = (0..10).collect();
/// let splits: Vec<_> = walk_forward_splits(&times, 5, 2, 2, 0).unwrap().collect();
///
/// assert_eq!(splits.len(), 2);
/// assert_eq!(splits[0].train, vec![0, 1, 2, 3, 4]);
/// assert_eq!(splits[0].test, vec![5, 6]);
/// assert_eq!(splits[1].train, vec![2, 3, 4, 5, 6]);
/// assert_eq!(splits[1].test, vec![7, 8]);
/// ```
pub fn walk_forward_splits<T>(
    times: &[T],
    train_size: usize,
    test_size: usize,
    step: usize,
    embargo: usize,
) -> Result<WalkForward> {
    WalkForward::build(
        times.len(),
        train_size,
        test_size,
        step,
        embargo,
        WindowMode::Rolling,
    )
}

/// Number of walk-forward splits over `len` points.
///
/// `floor((len - train_size - test_size) / step) + 1` when the first window
/// fits, otherwise 0. Returns 0 for a zero `step`.
pub fn split_count(len: usize, train_size: usize, test_size: usize, step: usize) -> usize {
    if step == 0 {
        return 0;
    }
    match train_size
        .checked_add(test_size)
        .and_then(|window| len.checked_sub(window))
    {
        Some(slack) => slack / step + 1,
        None => 0,
    }
}

fn validate_sizes(train_size: usize, test_size: usize, step: usize) -> Result<()> {
    if train_size == 0 {
        return Err(SplitError::invalid("train_size", "must be > 0"));
    }
    if test_size == 0 {
        return Err(SplitError::invalid("test_size", "must be > 0"));
    }
    if step == 0 {
        return Err(SplitError::invalid("step", "must be > 0"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Walk-forward parameters as a reusable value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkForwardConfig {
    pub train_size: usize,
    pub test_size: usize,
    pub step: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub embargo: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: WindowMode,
}

impl WalkForwardConfig {
    /// Rolling config with no embargo.
    pub fn new(train_size: usize, test_size: usize, step: usize) -> Self {
        Self {
            train_size,
            test_size,
            step,
            embargo: 0,
            mode: WindowMode::Rolling,
        }
    }

    pub fn with_embargo(mut self, embargo: usize) -> Self {
        self.embargo = embargo;
        self
    }

    pub fn with_mode(mut self, mode: WindowMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_sizes(self.train_size, self.test_size, self.step)
    }

    /// Splits over a timeline of `len` points.
    pub fn splits(&self, len: usize) -> Result<WalkForward> {
        WalkForward::build(
            len,
            self.train_size,
            self.test_size,
            self.step,
            self.embargo,
            self.mode,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
