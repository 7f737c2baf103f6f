//! Built-in threshold rules.

pub mod host;
pub mod vars;

pub use host::{HostChangeAbsRule, HostChangePctRule};
pub use vars::{VarChangeAbsRule, VarChangePctRule};
