use serde::{Deserialize, Serialize};

/// Aggregate churn counters for one current-vs-candidate comparison.
///
/// Produced by the diff engine and consumed by the threshold gate. The
/// percentage accessors floor their denominators at 1, so a comparison that
/// starts from an empty inventory still yields a finite (if large) ratio.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnMetrics {
    /// Number of hosts in the current inventory.
    pub current_hosts: usize,
    /// Number of hosts in the candidate inventory.
    pub candidate_hosts: usize,
    /// Hosts added plus hosts removed.
    pub host_delta: usize,
    /// Added, removed, and changed variable keys summed over common hosts.
    pub var_changes_total: usize,
    /// Filtered variable keys of common hosts on the current side, floored at 1.
    pub var_baseline_keys: usize,
}

impl ChurnMetrics {
    /// Host churn as a percentage of the current host count.
    pub fn host_delta_pct(&self) -> f64 {
        self.host_delta as f64 / self.current_hosts.max(1) as f64 * 100.0
    }

    /// Variable churn as a percentage of the baseline key count.
    pub fn var_change_pct(&self) -> f64 {
        self.var_changes_total as f64 / self.var_baseline_keys.max(1) as f64 * 100.0
    }
}
