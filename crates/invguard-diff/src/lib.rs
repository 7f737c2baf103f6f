//! Diff engine for Inventory Guard.
//!
//! Compares two resolved inventories (see `invguard-resolve`) and measures
//! how far the candidate drifts from the current one: which hosts appear or
//! disappear, and which variables are added, removed, or changed on hosts
//! present in both.
//!
//! Values are compared through their canonical form ([`canon`]), after
//! volatile keys are dropped ([`filter_vars`]) and set-like keys are
//! normalized so that reordering alone never counts as a change
//! ([`normalize`]).
//!
//! # Key Types
//!
//! - [`KeyPatterns`] -- Compiled key regexes (ignore list, set-like list)
//! - [`HostVarDiff`] -- Added/removed/changed keys for one host
//! - [`InventoryDiff`] -- Host-set delta, per-host changes, and churn totals

pub mod canon;
pub mod error;
pub mod filter;
pub mod host_diff;
pub mod inventory_diff;
pub mod patterns;

pub use canon::{canon, normalize};
pub use error::{DiffError, DiffResult};
pub use filter::filter_vars;
pub use host_diff::{diff_host_vars, HostVarDiff};
pub use inventory_diff::{diff_inventories, InventoryDiff};
pub use patterns::{KeyPatterns, DEFAULT_SET_LIKE_KEYS};
