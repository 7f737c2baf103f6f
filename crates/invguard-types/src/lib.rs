//! Foundation types for Inventory Guard.
//!
//! This crate provides the value model shared by every other crate: the
//! parsed inventory tree, the per-host variable mappings produced by the
//! resolver, and the aggregate churn metrics consumed by the gate.
//!
//! # Key Types
//!
//! - [`Value`] -- Closed variant over everything an inventory file can hold
//! - [`Mapping`] -- Insertion-ordered, string-keyed mapping node
//! - [`VarsMap`] / [`EffectiveHostVars`] -- Resolved variables per host
//! - [`ChurnMetrics`] -- Host and variable churn counters for one comparison

pub mod host;
pub mod json;
pub mod mapping;
pub mod metrics;
pub mod value;

pub use host::{EffectiveHostVars, VarsMap};
pub use mapping::Mapping;
pub use metrics::ChurnMetrics;
pub use value::Value;
