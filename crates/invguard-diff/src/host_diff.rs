//! Host-level diff: compare the resolved variables of one host.
//!
//! Both sides are flat `BTreeMap<String, Value>` mappings. The diff records
//! which keys were added, removed, or changed; values themselves are not
//! retained.

use serde::Serialize;

use invguard_types::VarsMap;

use crate::canon::{canon, normalize};
use crate::patterns::KeyPatterns;

/// Key-level changes for a single host.
///
/// Each list is sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HostVarDiff {
    /// Keys present only in the candidate.
    pub added_keys: Vec<String>,
    /// Keys present only in the current inventory.
    pub removed_keys: Vec<String>,
    /// Keys present on both sides whose canonical values differ.
    #[serde(rename = "changed_values")]
    pub changed_keys: Vec<String>,
}

impl HostVarDiff {
    /// Create an empty host diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of changed keys.
    pub fn len(&self) -> usize {
        self.added_keys.len() + self.removed_keys.len() + self.changed_keys.len()
    }
}

/// Compute the key-level diff between two variable mappings.
///
/// Values under keys matching `set_like` are normalized before their
/// canonical forms are compared.
pub fn diff_host_vars(current: &VarsMap, candidate: &VarsMap, set_like: &KeyPatterns) -> HostVarDiff {
    let mut diff = HostVarDiff::new();

    for (key, cur) in current {
        match candidate.get(key) {
            Some(cand) => {
                let a = canon(&normalize(key, cur, set_like));
                let b = canon(&normalize(key, cand, set_like));
                if a != b {
                    diff.changed_keys.push(key.clone());
                }
            }
            None => diff.removed_keys.push(key.clone()),
        }
    }

    diff.added_keys = candidate
        .keys()
        .filter(|k| !current.contains_key(*k))
        .cloned()
        .collect();

    diff
}
