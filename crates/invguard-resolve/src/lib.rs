//! Effective-variable resolver for Inventory Guard.
//!
//! Walks an inventory's group hierarchy (`vars`, `hosts`, `children`) and
//! produces, for every host, the fully inherited variable mapping.
//!
//! # Precedence
//!
//! Nearer declarations win: host vars override the vars of the group that
//! lists the host, which override the vars of every ancestor group. A host
//! listed under several groups is resolved once per occurrence and the
//! occurrences are folded in visitation order, so the last-visited group wins
//! on conflicting keys while keys unique to any occurrence survive.
//!
//! ```rust
//! use invguard_resolve::resolve;
//! use invguard_types::Value;
//!
//! let tree = Value::from(serde_json::json!({
//!     "all": {
//!         "vars": {"env": "prod"},
//!         "hosts": {"app-1": {"app_version": "1.0.0"}}
//!     }
//! }));
//! let hosts = resolve(&tree).unwrap();
//! assert_eq!(hosts["app-1"]["env"], Value::from("prod"));
//! ```

pub mod error;
pub mod resolver;

pub use error::{ResolveError, ResolveResult};
pub use resolver::{collect_occurrences, fold_occurrences, resolve, HostOccurrence};
