//! Errors returned by splitters and leakage guards.

/// Errors returned at the boundary of every fallible public operation.
///
/// Structurally valid but empty outcomes (an empty train side, zero
/// walk-forward splits) are never errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    /// A size, step or span parameter is outside its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    /// A partition references a position outside the timeline.
    #[error("index {index} out of range for timeline of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The same position appears on both sides of a partition.
    #[error("index {index} appears in both train and test")]
    NotDisjoint { index: usize },
}

impl SplitError {
    pub(crate) fn invalid(name: &'static str, reason: &'static str) -> Self {
        SplitError::InvalidParameter { name, reason }
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
