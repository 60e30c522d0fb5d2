//! Expanding-window cross-validation folds.
//!
//! Mirrors `sklearn.model_selection.TimeSeriesSplit` with default arguments,
//! so folds computed here line up with results produced on the Python side.
//!
//! # References
//!
//! - scikit-learn source: `sklearn/model_selection/_split.py`
//!   <https://github.com/scikit-learn/scikit-learn/blob/main/sklearn/model_selection/_split.py>

use log::debug;

use crate::types::Partition;

/// Expanding-window folds over `n_samples` observations.
///
/// - `test_size = n_samples / (n_splits + 1)` (integer floor division).
/// - Fold `k` tests on the `k`-th of the last `n_splits` test blocks and
///   trains on everything before it.
///
/// Returns no folds when `n_splits < 2`, `n_samples < 2`, or the test block
/// would be empty.
///
/// # Example
///
/// ```
/// use wfvkit::expanding_window_splits;
///
/// let folds = expanding_window_splits(10, 3);
/// assert_eq!(folds.len(), 3);
///
/// // Fold 0: train=[0..4], test=[4,5]
/// // Fold 1: train=[0..6], test=[6,7]
/// // Fold 2: train=[0..8], test=[8,9]
/// assert_eq!(folds[0].train, vec![0, 1, 2, 3]);
/// assert_eq!(folds[0].test, vec![4, 5]);
/// ```
pub fn expanding_window_splits(n_samples: usize, n_splits: usize) -> Vec<Partition> {
    if n_splits < 2 || n_samples < 2 {
        return vec![];
    }

    let Some(parts) = n_splits.checked_add(1) else {
        return vec![];
    };
    let test_size = n_samples / parts;
    if test_size == 0 {
        return vec![];
    }

    // test_starts = range(n - n_splits*test_size, n, test_size)
    let first_test_start = n_samples - n_splits * test_size;
    debug!(
        "expanding window: n={n_samples} folds={n_splits} test_size={test_size} first_test={first_test_start}"
    );

    (0..n_splits)
        .map(|k| {
            let test_start = first_test_start + k * test_size;
            Partition::from_ranges(0..test_start, test_start..test_start + test_size)
        })
        .collect()
}
