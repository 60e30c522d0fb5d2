//! Leakage guards: embargo and purge.
//!
//! Both operate on a finished [`Partition`] and know nothing about the
//! splitter that produced it, so they apply equally to walk-forward splits,
//! naive cut-offs and hand-built partitions.
//!
//! - **Embargo** drops a fixed number of positions next to the boundary.
//! - **Purge** drops train positions whose lookback window reaches into the
//!   time span covered by the test set.

use log::debug;

use crate::error::{Result, SplitError};
use crate::timeline::Instant;
use crate::types::Partition;

// ---------------------------------------------------------------------------
// Embargo
// ---------------------------------------------------------------------------

/// Which side(s) of the boundary an embargo trims.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EmbargoPolicy {
    /// Drop the last `n` train positions.
    #[default]
    TrailingTrain,
    /// Drop the first `n` test positions.
    LeadingTest,
    /// Drop `n` positions on each side.
    Symmetric,
}

impl EmbargoPolicy {
    fn trims_train(self) -> bool {
        matches!(self, EmbargoPolicy::TrailingTrain | EmbargoPolicy::Symmetric)
    }

    fn trims_test(self) -> bool {
        matches!(self, EmbargoPolicy::LeadingTest | EmbargoPolicy::Symmetric)
    }
}

/// Drop the last `embargo_size` train positions.
///
/// Those are the observations closest to the test window, i.e. the ones
/// whose labels are most likely to overlap it. The test side is untouched.
/// An embargo larger than the train side empties it; `0` is the identity.
///
/// "Last" is positional: for splitter output (ascending, train before test)
/// this is the tail adjacent to the boundary.
///
/// # Example
///
/// ```
/// use wfvkit::{embargo_after, Partition};
///
/// let p = embargo_after(Partition::from_ranges(0..5, 5..7), 2);
/// assert_eq!(p.train, vec![0, 1, 2]);
/// assert_eq!(p.test, vec![5, 6]);
/// ```
pub fn embargo_after(partition: Partition, embargo_size: usize) -> Partition {
    embargo_with(partition, embargo_size, EmbargoPolicy::TrailingTrain)
}

/// Embargo with an explicit [`EmbargoPolicy`].
///
/// A side shorter than `embargo_size` becomes empty.
pub fn embargo_with(mut partition: Partition, embargo_size: usize, policy: EmbargoPolicy) -> Partition {
    if embargo_size == 0 {
        return partition;
    }

    if policy.trims_train() {
        let keep = partition.train.len().saturating_sub(embargo_size);
        partition.train.truncate(keep);
    }
    if policy.trims_test() {
        let drop = embargo_size.min(partition.test.len());
        partition.test.drain(..drop);
    }

    debug!(
        "embargo {embargo_size} ({policy:?}): {} train, {} test remain",
        partition.train.len(),
        partition.test.len()
    );
    partition
}

// ---------------------------------------------------------------------------
// Purge
// ---------------------------------------------------------------------------

/// Drop train positions whose lookback window overlaps the test time span.
///
/// Train position `i` reaches back over `[times[i] - lookback, times[i]]`.
/// The test span is `[min, max]` of the test times, which on an ordered
/// timeline is `[times[test_first], times[test_last]]`. Both intervals are
/// closed; `i` is purged if they share any instant.
///
/// Test positions are never removed and surviving train positions keep
/// their order, so purging twice is the same as purging once. A partition
/// with an empty side is returned unchanged.
///
/// # Errors
///
/// - [`SplitError::InvalidParameter`] for a negative `lookback`.
/// - [`SplitError::IndexOutOfRange`] if the partition does not fit `times`.
///
/// # Example
///
/// ```
/// use wfvkit::{purge_overlap, Partition};
///
/// // Hourly bars; features use the previous 2 hours.
/// let times: Vec<i64> = (0..10).collect();
/// // Train sits on both sides of the test block.
/// let p = Partition::new(vec![0, 1, 2, 3, 7, 8, 9], vec![4, 5, 6]);
///
/// let purged = purge_overlap(p, &times, 2).unwrap();
/// assert_eq!(purged.train, vec![0, 1, 2, 3, 9]);
/// assert_eq!(purged.test, vec![4, 5, 6]);
/// ```
pub fn purge_overlap<T: Instant>(
    mut partition: Partition,
    times: &[T],
    lookback: T::Span,
) -> Result<Partition> {
    if T::is_negative_span(lookback) {
        return Err(SplitError::invalid("lookback", "must be >= 0"));
    }
    check_in_range(&partition, times.len())?;

    let Some((lo, hi)) = time_span(&partition.test, times) else {
        return Ok(partition);
    };

    let before = partition.train.len();
    partition.train.retain(|&i| {
        let t = times[i];
        !(t >= lo && t.reach_back(lookback) <= hi)
    });

    debug!(
        "purge: removed {} of {before} train indices",
        before - partition.train.len()
    );
    Ok(partition)
}

/// Row-count purge: lookback measured in positions rather than time.
///
/// Train position `i` reaches back over `[i - lookback_rows, i]` (clamped at
/// 0) and is dropped if that range meets `[min(test), max(test)]`. Matches
/// [`purge_overlap`] on a timeline whose value equals its position.
pub fn purge_overlap_rows(mut partition: Partition, lookback_rows: usize) -> Partition {
    let Some(test) = partition.test_span() else {
        return partition;
    };
    let (lo, hi) = (*test.start(), *test.end());

    let before = partition.train.len();
    partition
        .train
        .retain(|&i| !(i >= lo && i.saturating_sub(lookback_rows) <= hi));

    debug!(
        "row purge ({lookback_rows} rows): removed {} of {before} train indices",
        before - partition.train.len()
    );
    partition
}

fn check_in_range(partition: &Partition, len: usize) -> Result<()> {
    match partition.train.iter().chain(&partition.test).find(|&&i| i >= len) {
        Some(&index) => Err(SplitError::IndexOutOfRange { index, len }),
        None => Ok(()),
    }
}

fn time_span<T: Instant>(positions: &[usize], times: &[T]) -> Option<(T, T)> {
    let mut it = positions.iter().map(|&i| times[i]);
    let first = it.next()?;
    Some(it.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
