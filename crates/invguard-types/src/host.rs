//! Resolved per-host variable mappings.

use std::collections::BTreeMap;

use crate::value::Value;

/// Flat variable mapping of one host: variable name → value.
pub type VarsMap = BTreeMap<String, Value>;

/// Fully resolved variables for every host in one inventory, keyed by host name.
pub type EffectiveHostVars = BTreeMap<String, VarsMap>;
