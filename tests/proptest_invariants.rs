//! Property-based tests for partition invariants.
//!
//! These tests use proptest to verify that splitting and guarding
//! invariants hold across randomly generated timelines and parameters.

use proptest::prelude::*;
use wfvkit::{
    EmbargoPolicy, Partition, WalkForward, embargo_after, embargo_with, naive_time_split,
    purge_overlap, purge_overlap_rows, walk_forward_splits,
};

/// Generate an unsorted timeline of small integer timestamps
fn timeline_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000i64..1_000, 0..200)
}

/// Generate a sorted timeline (non-decreasing, ties allowed)
fn sorted_timeline_strategy() -> impl Strategy<Value = Vec<i64>> {
    timeline_strategy().prop_map(|mut v| {
        v.sort_unstable();
        v
    })
}

/// Generate walk-forward parameters (len, train, test, step)
fn wf_params_strategy() -> impl Strategy<Value = (usize, usize, usize, usize)> {
    (0usize..300, 1usize..60, 1usize..30, 1usize..40)
}

/// Generate an embargo policy
fn policy_strategy() -> impl Strategy<Value = EmbargoPolicy> {
    prop_oneof![
        Just(EmbargoPolicy::TrailingTrain),
        Just(EmbargoPolicy::LeadingTest),
        Just(EmbargoPolicy::Symmetric),
    ]
}

/// Generate an arbitrary disjoint partition over `0..len` by random side assignment
fn partition_strategy(len: usize) -> impl Strategy<Value = Partition> {
    prop::collection::vec(0u8..3, len).prop_map(|sides| {
        let mut p = Partition::default();
        for (i, side) in sides.into_iter().enumerate() {
            match side {
                0 => p.train.push(i),
                1 => p.test.push(i),
                _ => {}
            }
        }
        p
    })
}

fn timeline_and_partition() -> impl Strategy<Value = (Vec<i64>, Partition)> {
    sorted_timeline_strategy().prop_flat_map(|times| {
        let len = times.len();
        (Just(times), partition_strategy(len))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // ========================================================================
    // NAIVE SPLIT
    // ========================================================================

    /// Train is strictly before the cut-off, test at or after it
    #[test]
    fn naive_sides_respect_cutoff(times in timeline_strategy(), cut in -1_100i64..1_100) {
        let p = naive_time_split(&times, &cut);
        for &i in &p.train {
            prop_assert!(times[i] < cut, "train index {} at {} >= {}", i, times[i], cut);
        }
        for &i in &p.test {
            prop_assert!(times[i] >= cut, "test index {} at {} < {}", i, times[i], cut);
        }
    }

    /// Train ∪ test is exactly 0..n with no duplicates
    #[test]
    fn naive_covers_every_index_once(times in timeline_strategy(), cut in -1_100i64..1_100) {
        let p = naive_time_split(&times, &cut);
        let mut all: Vec<usize> = p.train.iter().chain(&p.test).copied().collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..times.len()).collect::<Vec<_>>());
        prop_assert!(p.validate(times.len()).is_ok());
    }

    // ========================================================================
    // WALK-FORWARD
    // ========================================================================

    /// Every split has exact sizes and train wholly precedes test
    #[test]
    fn walk_forward_window_shape((len, train, test, step) in wf_params_strategy()) {
        for p in WalkForward::new(len, train, test, step).unwrap() {
            prop_assert_eq!(p.train.len(), train);
            prop_assert_eq!(p.test.len(), test);
            prop_assert!(p.train.iter().max() < p.test.iter().min());
            prop_assert!(p.validate(len).is_ok());
        }
    }

    /// Consecutive train starts differ by exactly `step`
    #[test]
    fn walk_forward_advances_by_step((len, train, test, step) in wf_params_strategy()) {
        let starts: Vec<usize> = WalkForward::new(len, train, test, step)
            .unwrap()
            .map(|p| p.train[0])
            .collect();
        for pair in starts.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], step);
        }
        if let Some(&first) = starts.first() {
            prop_assert_eq!(first, 0);
        }
    }

    /// Split count matches floor((n - train - test) / step) + 1, or 0
    #[test]
    fn walk_forward_count((len, train, test, step) in wf_params_strategy()) {
        let expected = if len >= train + test { (len - train - test) / step + 1 } else { 0 };
        let wf = WalkForward::new(len, train, test, step).unwrap();
        prop_assert_eq!(wf.len(), expected);
        prop_assert_eq!(wf.count(), expected);
    }

    /// Re-invoking with the same arguments reproduces the same sequence
    #[test]
    fn walk_forward_restartable((len, train, test, step) in wf_params_strategy(), embargo in 0usize..10) {
        let times = vec![0u8; len];
        let a: Vec<_> = walk_forward_splits(&times, train, test, step, embargo).unwrap().collect();
        let b: Vec<_> = walk_forward_splits(&times, train, test, step, embargo).unwrap().collect();
        prop_assert_eq!(a, b);
    }

    /// Anchored windows share test sets with rolling ones and start at 0
    #[test]
    fn anchored_matches_rolling_tests((len, train, test, step) in wf_params_strategy()) {
        let rolling = WalkForward::new(len, train, test, step).unwrap();
        let anchored = WalkForward::anchored(len, train, test, step).unwrap();
        prop_assert_eq!(rolling.len(), anchored.len());
        for (r, a) in rolling.zip(anchored) {
            prop_assert_eq!(&r.test, &a.test);
            prop_assert_eq!(a.train.first().copied(), Some(0));
            prop_assert_eq!(a.train.last(), r.train.last());
        }
    }

    // ========================================================================
    // EMBARGO
    // ========================================================================

    /// Embargo never grows either side and only removes from the edges
    #[test]
    fn embargo_shrinks_only(
        (_, p) in timeline_and_partition(),
        size in 0usize..50,
        policy in policy_strategy(),
    ) {
        let out = embargo_with(p.clone(), size, policy);
        prop_assert!(out.train.len() <= p.train.len());
        prop_assert!(out.test.len() <= p.test.len());
        prop_assert!(p.train.starts_with(&out.train));
        prop_assert!(p.test.ends_with(&out.test));
    }

    /// Embargo of size zero is the identity
    #[test]
    fn embargo_zero_identity((_, p) in timeline_and_partition()) {
        prop_assert_eq!(embargo_after(p.clone(), 0), p);
    }

    // ========================================================================
    // PURGE
    // ========================================================================

    /// Purge never removes test indices and never reorders train
    #[test]
    fn purge_preserves_test_and_order((times, p) in timeline_and_partition(), lookback in 0i64..200) {
        let out = purge_overlap(p.clone(), &times, lookback).unwrap();
        prop_assert_eq!(&out.test, &p.test);
        // surviving train is a subsequence of the original
        let mut it = p.train.iter();
        for i in &out.train {
            prop_assert!(it.any(|j| j == i), "train order changed");
        }
    }

    /// Purging twice is the same as purging once
    #[test]
    fn purge_idempotent((times, p) in timeline_and_partition(), lookback in 0i64..200) {
        let once = purge_overlap(p, &times, lookback).unwrap();
        let twice = purge_overlap(once.clone(), &times, lookback).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// No surviving train lookback window touches the test span
    #[test]
    fn purge_removes_all_overlap((times, p) in timeline_and_partition(), lookback in 0i64..200) {
        let out = purge_overlap(p, &times, lookback).unwrap();
        if let (Some(lo), Some(hi)) = (
            out.test.iter().map(|&i| times[i]).min(),
            out.test.iter().map(|&i| times[i]).max(),
        ) {
            for &i in &out.train {
                let t = times[i];
                prop_assert!(t < lo || t - lookback > hi, "index {} at {} overlaps [{}, {}]", i, t, lo, hi);
            }
        }
    }

    /// Row purge equals time purge on a timeline whose values are positions
    #[test]
    fn row_purge_matches_positional_timeline(p in partition_strategy(120), lookback in 0usize..30) {
        let times: Vec<usize> = (0..120).collect();
        let by_time = purge_overlap(p.clone(), &times, lookback).unwrap();
        prop_assert_eq!(by_time, purge_overlap_rows(p, lookback));
    }
}
