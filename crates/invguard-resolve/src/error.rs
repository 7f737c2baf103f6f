//! Error types for the resolver crate.

/// Errors that can occur while resolving an inventory tree.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    /// A node that must be a mapping had some other shape.
    #[error("expected a mapping at {path}, found {found}")]
    NotAMapping { path: String, found: &'static str },
}

/// Convenience alias for resolver results.
pub type ResolveResult<T> = Result<T, ResolveError>;
