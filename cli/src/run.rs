//! Plan execution: split, guard, and emit one record per partition.

use std::io::Write;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use wfvkit::{Partition, naive_time_split, split_count};

use crate::config::Plan;
use crate::error::{Error, Result};

/// One guarded partition with the timestamps it covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitRecord {
    pub fold: usize,
    pub train_len: usize,
    pub test_len: usize,
    pub train_start: Option<DateTime<Utc>>,
    pub train_end: Option<DateTime<Utc>>,
    pub test_start: Option<DateTime<Utc>>,
    pub test_end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<Partition>,
}

impl SplitRecord {
    fn new(fold: usize, partition: Partition, times: &[DateTime<Utc>], compact: bool) -> Self {
        let at = |i: Option<&usize>| i.map(|&i| times[i]);
        Self {
            fold,
            train_len: partition.train.len(),
            test_len: partition.test.len(),
            train_start: at(partition.train.first()),
            train_end: at(partition.train.last()),
            test_start: at(partition.test.first()),
            test_end: at(partition.test.last()),
            partition: (!compact).then_some(partition),
        }
    }
}

/// Walk-forward records for a plan, guarded.
pub fn plan_records(plan: &Plan, compact: bool) -> Result<Vec<SplitRecord>> {
    let times = plan.times();
    let splits = plan.splits()?;
    let guard = plan.guard();

    info!(
        "planning {} walk-forward splits over {} points",
        splits.len(),
        times.len()
    );
    if splits.len() == 0 {
        warn!("timeline too short for a single train/test window");
    }

    let mut records = Vec::with_capacity(splits.len());
    for (fold, split) in splits.enumerate() {
        let guarded = guard.apply(split, &times)?;
        if guarded.train.is_empty() {
            warn!("fold {fold}: guard left an empty train set");
        }
        records.push(SplitRecord::new(fold, guarded, &times, compact));
    }
    Ok(records)
}

/// Naive cut-off split of the plan's timeline, guarded.
pub fn naive_record(plan: &Plan, train_end: &str, compact: bool) -> Result<SplitRecord> {
    let cut = DateTime::parse_from_rfc3339(train_end)
        .map_err(|source| Error::Timestamp {
            value: train_end.to_string(),
            source,
        })?
        .with_timezone(&Utc);

    let times = plan.times();
    let split = naive_time_split(&times, &cut);
    debug!("naive split at {cut}: {split}");

    let guarded = plan.guard().apply(split, &times)?;
    Ok(SplitRecord::new(0, guarded, &times, compact))
}

/// Number of walk-forward splits, validating parameters first.
pub fn count(len: usize, train: usize, test: usize, step: usize) -> Result<usize> {
    wfvkit::WalkForwardConfig::new(train, test, step).validate()?;
    Ok(split_count(len, train, test, step))
}

/// Write records as JSON lines.
pub fn write_records<W: Write>(out: &mut W, records: &[SplitRecord]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    Ok(())
}
