//! Purge + embargo as one reusable value.

use crate::error::Result;
use crate::leakage::{EmbargoPolicy, embargo_with, purge_overlap};
use crate::splits::WalkForward;
use crate::timeline::Instant;
use crate::types::Partition;

/// Leakage guard applied to every partition a splitter produces.
///
/// Purge runs first (it reasons about timestamps), then embargo trims the
/// surviving positions. A guard with no lookback and zero embargo returns
/// partitions unchanged.
///
/// `S` is the lookback span type of the timeline, e.g. `i64` for epoch
/// seconds or `chrono::TimeDelta` for `DateTime<Utc>`.
///
/// # Example
///
/// ```
/// use wfvkit::{LeakageGuard, walk_forward_splits};
///
/// let times: Vec<i64> = (0..20).collect();
/// let guard = LeakageGuard::new().with_embargo(1).with_lookback(2);
///
/// for split in walk_forward_splits(&times, 8, 4, 4, 0).unwrap() {
///     let split = guard.apply(split, &times).unwrap();
///     assert_eq!(split.train.len(), 7);
///     assert_eq!(split.test.len(), 4);
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeakageGuard<S> {
    embargo: usize,
    policy: EmbargoPolicy,
    lookback: Option<S>,
}

impl<S> Default for LeakageGuard<S> {
    fn default() -> Self {
        Self {
            embargo: 0,
            policy: EmbargoPolicy::TrailingTrain,
            lookback: None,
        }
    }
}

impl<S: Copy> LeakageGuard<S> {
    /// Identity guard: no purge, no embargo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard carrying the embargo requested on a walk-forward iterator.
    pub fn for_walk_forward(wf: &WalkForward) -> Self {
        Self::new().with_embargo(wf.embargo())
    }

    pub fn with_embargo(mut self, embargo: usize) -> Self {
        self.embargo = embargo;
        self
    }

    pub fn with_policy(mut self, policy: EmbargoPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_lookback(mut self, lookback: S) -> Self {
        self.lookback = Some(lookback);
        self
    }

    pub fn embargo(&self) -> usize {
        self.embargo
    }

    pub fn policy(&self) -> EmbargoPolicy {
        self.policy
    }

    pub fn lookback(&self) -> Option<S> {
        self.lookback
    }

    pub fn is_identity(&self) -> bool {
        self.embargo == 0 && self.lookback.is_none()
    }

    /// Purge (if a lookback is set), then embargo.
    pub fn apply<T>(&self, partition: Partition, times: &[T]) -> Result<Partition>
    where
        T: Instant<Span = S>,
    {
        let purged = match self.lookback {
            Some(lookback) => purge_overlap(partition, times, lookback)?,
            None => partition,
        };
        Ok(embargo_with(purged, self.embargo, self.policy))
    }

    /// Lazily guard every partition of `partitions`.
    pub fn apply_all<'a, T, I>(
        &'a self,
        partitions: I,
        times: &'a [T],
    ) -> impl Iterator<Item = Result<Partition>> + 'a
    where
        T: Instant<Span = S>,
        I: IntoIterator<Item = Partition>,
        I::IntoIter: 'a,
    {
        partitions.into_iter().map(move |p| self.apply(p, times))
    }

    /// Guard a batch of partitions in parallel, preserving order.
    ///
    /// Fails if any partition fails to guard.
    #[cfg(feature = "parallel")]
    pub fn par_apply_all<T>(&self, partitions: Vec<Partition>, times: &[T]) -> Result<Vec<Partition>>
    where
        T: Instant<Span = S> + Sync,
        S: Send + Sync,
    {
        use rayon::prelude::*;

        partitions
            .into_par_iter()
            .map(|p| self.apply(p, times))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leakage::embargo_after;
    use crate::splits::{WalkForward, naive_time_split};

    #[test]
    fn identity_guard() {
        let guard = LeakageGuard::<i64>::new();
        assert!(guard.is_identity());
        let times: Vec<i64> = (0..7).collect();
        let p = Partition::from_ranges(0..5, 5..7);
        assert_eq!(guard.apply(p.clone(), &times).unwrap(), p);
    }

    #[test]
    fn purge_then_embargo() {
        let times: Vec<i64> = (0..10).collect();
        let p = Partition::new(vec![0, 1, 2, 3, 7, 8, 9], vec![4, 5, 6]);
        let guard = LeakageGuard::new().with_lookback(2).with_embargo(1);
        // purge leaves [0,1,2,3,9]; embargo then drops the trailing 9
        let out = guard.apply(p, &times).unwrap();
        assert_eq!(out.train, vec![0, 1, 2, 3]);
        assert_eq!(out.test, vec![4, 5, 6]);
    }

    #[test]
    fn guard_on_naive_split() {
        let times = [10u64, 20, 30, 40, 50, 60];
        let p = naive_time_split(&times, &40);
        let guard = LeakageGuard::new()
            .with_embargo(1)
            .with_policy(EmbargoPolicy::Symmetric);
        let out = guard.apply(p, &times).unwrap();
        assert_eq!(out.train, vec![0, 1]);
        assert_eq!(out.test, vec![4, 5]);
    }

    #[test]
    fn for_walk_forward_picks_up_embargo() {
        let times = [0u32; 12];
        let wf = crate::walk_forward_splits(&times, 4, 2, 2, 1).unwrap();
        let guard = LeakageGuard::<u32>::for_walk_forward(&wf);
        assert_eq!(guard.embargo(), 1);
        assert_eq!(guard.lookback(), None);

        let expected: Vec<_> = wf.clone().map(|p| embargo_after(p, 1)).collect();
        let guarded: Vec<_> = guard
            .apply_all(wf, &times)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(guarded, expected);
    }

    #[test]
    fn apply_all_surfaces_errors() {
        let times = [0i64, 1, 2];
        let guard = LeakageGuard::new().with_lookback(1);
        let bad = vec![Partition::from_ranges(0..1, 1..2), Partition::new(vec![0], vec![7])];
        let results: Vec<_> = guard.apply_all(bad, &times).collect();
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let times: Vec<i64> = (0..200).collect();
        let guard = LeakageGuard::new().with_lookback(3).with_embargo(2);
        let splits: Vec<_> = WalkForward::new(times.len(), 30, 10, 5).unwrap().collect();
        let seq: Vec<_> = guard
            .apply_all(splits.clone(), &times)
            .collect::<Result<_>>()
            .unwrap();
        let par = guard.par_apply_all(splits, &times).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn walk_forward_guarded_stays_chronological() {
        let times: Vec<i64> = (0..100).collect();
        let guard = LeakageGuard::new().with_lookback(5).with_embargo(3);
        for p in WalkForward::new(times.len(), 20, 5, 5).unwrap() {
            let out = guard.apply(p, &times).unwrap();
            assert!(out.is_chronological());
            assert_eq!(out.train.len(), 17);
            assert_eq!(out.test.len(), 5);
        }
    }
}
