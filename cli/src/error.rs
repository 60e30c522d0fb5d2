//! Error types for the split planner.

use std::path::PathBuf;

/// All errors that can occur while planning splits.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read plan file {path}: {source}")]
    PlanRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse plan: {0}")]
    PlanParse(#[from] toml::de::Error),

    #[error("invalid timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("split error: {0}")]
    Split(#[from] wfvkit::SplitError),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
