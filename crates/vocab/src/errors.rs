use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy for the vocabulary pipeline.
///
/// Every variant names the stage it belongs to, so a caller can report
/// which stage aborted the run without inspecting internals. Nothing here
/// is retried; the run stops at the first error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The segmenter's dictionary resource could not be loaded. Raised at
    /// construction, never per line.
    #[error("segmenter dictionary unreadable at {path}: {reason}")]
    Resource { path: PathBuf, reason: String },

    /// An input glob pattern expanded to zero readable files.
    #[error("input pattern '{pattern}' matched no files")]
    InputNotFound { pattern: String },

    #[error("invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Subword induction could not satisfy the request, with the trainer's
    /// own diagnostic attached.
    #[error("subword training failed: {0}")]
    Training(String),

    /// An inventory line did not parse as `token<TAB>score`. The line
    /// number is 1-based.
    #[error("malformed inventory line {line}: expected token<TAB>score")]
    Format { line: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
