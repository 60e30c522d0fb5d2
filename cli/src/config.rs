//! TOML plan loading and validation.

use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use wfvkit::{EmbargoPolicy, LeakageGuard, WalkForward, WalkForwardConfig};

use crate::error::{Error, Result};

/// Largest timeline a plan may materialise.
pub const MAX_TIMELINE_POINTS: usize = 10_000_000;

/// Top-level plan.
#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    pub timeline: TimelineConfig,
    pub walk_forward: WalkForwardConfig,
    #[serde(default)]
    pub guard: GuardConfig,
}

/// Regularly spaced timeline: `count` points `interval_secs` apart.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineConfig {
    pub start: DateTime<Utc>,
    pub count: usize,
    #[serde(default = "default_interval")]
    pub interval_secs: i64,
}

fn default_interval() -> i64 {
    86_400
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuardConfig {
    /// Feature lookback in seconds; no purge when absent.
    #[serde(default)]
    pub lookback_secs: Option<i64>,
    #[serde(default)]
    pub policy: EmbargoPolicy,
}

impl Plan {
    /// Load a plan from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::PlanRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse from a TOML string (useful for testing).
    pub fn from_toml(contents: &str) -> Result<Self> {
        let plan: Plan = toml::from_str(contents)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Validate plan invariants.
    fn validate(&self) -> Result<()> {
        if self.timeline.count > MAX_TIMELINE_POINTS {
            return Err(Error::Config(format!(
                "timeline.count must be <= {MAX_TIMELINE_POINTS}"
            )));
        }
        if self.timeline.interval_secs <= 0 {
            return Err(Error::Config("timeline.interval_secs must be > 0".into()));
        }
        if let Some(lookback) = self.guard.lookback_secs {
            if lookback < 0 {
                return Err(Error::Config("guard.lookback_secs must be >= 0".into()));
            }
            if TimeDelta::try_seconds(lookback).is_none() {
                return Err(Error::Config("guard.lookback_secs out of range".into()));
            }
        }
        self.walk_forward.validate()?;

        // interval_secs alone must fit a TimeDelta even for an empty timeline
        if TimeDelta::try_seconds(self.timeline.interval_secs).is_none() {
            return Err(Error::Config("timeline.interval_secs out of range".into()));
        }

        let span = i64::try_from(self.timeline.count)
            .ok()
            .and_then(|n| n.checked_mul(self.timeline.interval_secs))
            .and_then(TimeDelta::try_seconds);
        if span.and_then(|s| self.timeline.start.checked_add_signed(s)).is_none() {
            return Err(Error::Config(
                "timeline runs past the representable date range".into(),
            ));
        }
        Ok(())
    }

    /// Materialise the timeline.
    pub fn times(&self) -> Vec<DateTime<Utc>> {
        let step = TimeDelta::seconds(self.timeline.interval_secs);
        (0..self.timeline.count)
            .scan(self.timeline.start, |t, _| {
                let current = *t;
                *t += step;
                Some(current)
            })
            .collect()
    }

    pub fn splits(&self) -> Result<WalkForward> {
        Ok(self.walk_forward.splits(self.timeline.count)?)
    }

    /// Guard for this plan: the walk-forward embargo, the configured policy
    /// and, if set, a purge lookback.
    pub fn guard(&self) -> LeakageGuard<TimeDelta> {
        let guard = LeakageGuard::new()
            .with_embargo(self.walk_forward.embargo)
            .with_policy(self.guard.policy);
        match self.guard.lookback_secs {
            Some(secs) => guard.with_lookback(TimeDelta::seconds(secs)),
            None => guard,
        }
    }
}
