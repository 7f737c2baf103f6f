use std::fmt;

/// Errors that can occur when configuring the gate.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// A limit is out of range.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PartialEq for GateError {
    fn eq(&self, other: &Self) -> bool {
        // Compare by display representation for test convenience.
        fmt::format(format_args!("{self}")) == fmt::format(format_args!("{other}"))
    }
}

impl Eq for GateError {}
