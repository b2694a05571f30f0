//! Error types for the analysis crate.

use thiserror::Error;

/// Errors produced while loading records or deriving trajectories from them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    /// A record or config file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),

    /// A record file is not valid JSON or does not carry the expected fields.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// File that failed to parse.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A named array does not have as many entries as `times`.
    #[error("Field '{field}' has {found} entries, expected {expected} (length of 'times')")]
    LengthMismatch {
        /// Offending field name, as spelled in the record file.
        field: &'static str,
        /// Length of the `times` array.
        expected: usize,
        /// Length of the offending array.
        found: usize,
    },

    /// The study configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),

    /// No run with the requested shot count is part of the study.
    #[error("No run with {0} shots in this study")]
    UnknownRun(u32),

    /// Report serialization failed.
    #[error("Export error: {0}")]
    Export(String),
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        AnalysisError::Export(e.to_string())
    }
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
