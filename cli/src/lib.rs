//! wfvkit-cli: plan leakage-aware walk-forward splits from a TOML file.
//!
//! Builds a regular timeline from the plan, runs the configured splitter,
//! applies purge/embargo and emits one JSON record per partition.

pub mod config;
pub mod error;
pub mod run;
