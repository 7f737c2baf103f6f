//! Inventory-level diff: host-set delta plus per-host variable churn.

use std::collections::BTreeMap;

use invguard_types::{ChurnMetrics, EffectiveHostVars};

use crate::filter::filter_vars;
use crate::host_diff::{diff_host_vars, HostVarDiff};
use crate::patterns::KeyPatterns;

/// The result of comparing two resolved inventories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InventoryDiff {
    /// Number of hosts in the current inventory.
    pub current_hosts: usize,
    /// Number of hosts in the candidate inventory.
    pub candidate_hosts: usize,
    /// Hosts only in the candidate, sorted.
    pub added_hosts: Vec<String>,
    /// Hosts only in the current inventory, sorted.
    pub removed_hosts: Vec<String>,
    /// Number of hosts present on both sides.
    pub common_hosts: usize,
    /// Changes for common hosts that have at least one changed key.
    pub per_host: BTreeMap<String, HostVarDiff>,
    /// Sum of per-host change counts over common hosts.
    pub var_changes_total: usize,
    /// Filtered current-side key count over common hosts, floored at 1.
    pub var_baseline_keys: usize,
}

impl InventoryDiff {
    /// Hosts added plus hosts removed.
    pub fn host_delta(&self) -> usize {
        self.added_hosts.len() + self.removed_hosts.len()
    }

    /// Returns `true` if nothing changed at all.
    pub fn is_empty(&self) -> bool {
        self.host_delta() == 0 && self.var_changes_total == 0
    }

    /// Aggregate counters for the threshold gate.
    pub fn metrics(&self) -> ChurnMetrics {
        ChurnMetrics {
            current_hosts: self.current_hosts,
            candidate_hosts: self.candidate_hosts,
            host_delta: self.host_delta(),
            var_changes_total: self.var_changes_total,
            var_baseline_keys: self.var_baseline_keys,
        }
    }
}

/// Compare two resolved inventories.
///
/// Hosts are matched by name. For every host present on both sides, keys
/// matching `ignore` are dropped from both mappings and the remainder is
/// compared with [`diff_host_vars`]. Hosts are visited in sorted order, so
/// the result is fully deterministic.
pub fn diff_inventories(
    current: &EffectiveHostVars,
    candidate: &EffectiveHostVars,
    ignore: &KeyPatterns,
    set_like: &KeyPatterns,
) -> InventoryDiff {
    let added_hosts: Vec<String> = candidate
        .keys()
        .filter(|h| !current.contains_key(*h))
        .cloned()
        .collect();
    let removed_hosts: Vec<String> = current
        .keys()
        .filter(|h| !candidate.contains_key(*h))
        .cloned()
        .collect();

    let mut common_hosts = 0;
    let mut var_changes_total = 0;
    let mut var_baseline_keys = 0;
    let mut per_host = BTreeMap::new();

    for (host, cur_vars) in current {
        let Some(cand_vars) = candidate.get(host) else {
            continue;
        };
        common_hosts += 1;

        let cur = filter_vars(cur_vars, ignore);
        let cand = filter_vars(cand_vars, ignore);
        let diff = diff_host_vars(&cur, &cand, set_like);

        var_baseline_keys += cur.len();
        var_changes_total += diff.len();

        if !diff.is_empty() {
            tracing::debug!(
                host = %host,
                added = diff.added_keys.len(),
                removed = diff.removed_keys.len(),
                changed = diff.changed_keys.len(),
                "host variables differ"
            );
            per_host.insert(host.clone(), diff);
        }
    }

    let diff = InventoryDiff {
        current_hosts: current.len(),
        candidate_hosts: candidate.len(),
        added_hosts,
        removed_hosts,
        common_hosts,
        per_host,
        var_changes_total,
        var_baseline_keys: var_baseline_keys.max(1),
    };
    tracing::debug!(
        host_delta = diff.host_delta(),
        common = diff.common_hosts,
        var_changes = diff.var_changes_total,
        "inventory diff computed"
    );
    diff
}
