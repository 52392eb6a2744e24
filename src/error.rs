use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the splitting library.
///
/// Splitting itself never fails; every variant here comes from loading the
/// knowledge base or reading evaluation data.
#[derive(Error, Debug)]
pub enum SplitError {
    /// Knowledge-base backing data is missing or corrupt.
    #[error("knowledge base unavailable: {path}: {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    /// A special-term entry could not be accepted.
    #[error("invalid special term '{term}': {reason}")]
    InvalidSpecialTerm { term: String, reason: String },

    /// An oracle file could not be read.
    #[error("cannot read oracle file {path}: {reason}")]
    OracleUnavailable { path: PathBuf, reason: String },

    /// A row of an oracle file does not follow `identifier<TAB>tok,tok,...`.
    #[error("malformed oracle row {line}: {reason}")]
    MalformedOracle { line: usize, reason: String },
}

impl SplitError {
    pub(crate) fn data(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        SplitError::DataUnavailable {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn oracle(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        SplitError::OracleUnavailable {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
