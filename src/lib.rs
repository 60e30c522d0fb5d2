//! # wfvkit
//!
//! Train/test index partitions over an ordered timeline, built to keep
//! look-ahead bias out of time-series model validation.
//!
//! ## Features
//!
//! - **Naive split**: one cut-off instant, train before, test from it on
//! - **Walk-forward**: lazy rolling (or anchored) train/test windows in index space
//! - **Expanding window**: `TimeSeriesSplit`-compatible folds
//! - **Embargo**: drop positions next to the train/test boundary
//! - **Purge**: drop train positions whose lookback window reaches into the test span
//!
//! Splitters and guards are independent pure functions: any partition, from
//! any source, can be purged or embargoed.
//!
//! ## Quick Start
//!
//! ```
//! use wfvkit::{embargo_after, walk_forward_splits};
//!
//! let times: Vec<u32> = (0..10).collect();
//!
//! let splits: Vec<_> = walk_forward_splits(&times, 5, 2, 2, 0)
//!     .unwrap()
//!     .map(|p| embargo_after(p, 1))
//!     .collect();
//!
//! assert_eq!(splits.len(), 2);
//! assert_eq!(splits[0].train, vec![0, 1, 2, 3]);
//! assert_eq!(splits[0].test, vec![5, 6]);
//! assert_eq!(splits[1].train, vec![2, 3, 4, 5]);
//! assert_eq!(splits[1].test, vec![7, 8]);
//! ```
//!
//! ## Naive Split
//!
//! ```
//! # #[cfg(feature = "chrono")] {
//! use chrono::NaiveDate;
//! use wfvkit::naive_time_split;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
//! let times = [day(1), day(2), day(3), day(4)];
//!
//! let p = naive_time_split(&times, &day(3));
//! assert_eq!(p.train, vec![0, 1]);
//! assert_eq!(p.test, vec![2, 3]);
//! # }
//! ```
//!
//! ## Purge
//!
//! Purging is time-based: a train observation at `t` whose features look
//! back over `[t - lookback, t]` is dropped if that interval meets the test
//! span. Use [`purge_overlap_rows`] for a lookback counted in rows.
//!
//! ```
//! # #[cfg(feature = "chrono")] {
//! use chrono::{DateTime, TimeDelta, Utc};
//! use wfvkit::{Partition, purge_overlap};
//!
//! let t0 = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
//! let times: Vec<_> = (0..8).map(|h| t0 + TimeDelta::hours(h)).collect();
//!
//! // Test block in the middle, train on both sides of it
//! let p = Partition::new(vec![0, 1, 2, 6, 7], vec![3, 4, 5]);
//! let purged = purge_overlap(p, &times, TimeDelta::hours(1)).unwrap();
//!
//! assert_eq!(purged.train, vec![0, 1, 2, 7]);
//! # }
//! ```
//!
//! ## Embargo Policy
//!
//! | Policy | Trims |
//! |--------|-------|
//! | **TrailingTrain** (default) | last `n` train positions |
//! | **LeadingTest** | first `n` test positions |
//! | **Symmetric** | both |

pub mod cv;
mod error;
mod guard;
pub mod leakage;
pub mod splits;
mod timeline;
mod types;

// Re-export public API
pub use cv::expanding_window_splits;
pub use error::{Result, SplitError};
pub use guard::LeakageGuard;
pub use leakage::{EmbargoPolicy, embargo_after, embargo_with, purge_overlap, purge_overlap_rows};
pub use splits::{
    WalkForward, WalkForwardConfig, WindowMode, naive_time_split, split_count, walk_forward_splits,
};
pub use timeline::Instant;
pub use types::{IndexSet, Partition};
