//! Error types for the diff crate.

/// Errors that can occur while preparing a diff.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A key pattern is not a valid regular expression.
    #[error("invalid key pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
