//! Machine-readable (JSON) and human-readable (Markdown) run summaries.

use std::collections::BTreeMap;

use serde::Serialize;

use invguard_diff::{HostVarDiff, InventoryDiff};
use invguard_gate::Limits;

/// Most hosts listed in the per-host sample.
pub const SAMPLE_HOSTS: usize = 20;

/// Summary of one comparison, as written by `--json` and `--json-out`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub current_hosts: usize,
    pub new_hosts: usize,
    pub host_added: Vec<String>,
    pub host_removed: Vec<String>,
    pub host_delta: usize,
    pub host_delta_pct: f64,

    pub var_changes_total: usize,
    pub var_change_pct: f64,
    pub var_baseline_keys: usize,

    pub limits: Limits,
    pub sample_per_host_changes: BTreeMap<String, HostVarDiff>,
}

impl Summary {
    pub fn new(diff: &InventoryDiff, limits: &Limits) -> Self {
        let metrics = diff.metrics();
        Self {
            current_hosts: diff.current_hosts,
            new_hosts: diff.candidate_hosts,
            host_added: diff.added_hosts.clone(),
            host_removed: diff.removed_hosts.clone(),
            host_delta: metrics.host_delta,
            host_delta_pct: round3(metrics.host_delta_pct()),
            var_changes_total: metrics.var_changes_total,
            var_change_pct: round3(metrics.var_change_pct()),
            var_baseline_keys: metrics.var_baseline_keys,
            limits: limits.clone(),
            sample_per_host_changes: diff
                .per_host
                .iter()
                .take(SAMPLE_HOSTS)
                .map(|(h, d)| (h.clone(), d.clone()))
                .collect(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Markdown report.
    pub fn to_markdown(&self) -> String {
        let mut lines = vec![
            "# Inventory Semantic Summary\n".to_string(),
            format!("- **Current hosts**: {}", self.current_hosts),
            format!("- **New hosts**: {}", self.new_hosts),
            format!(
                "- **Host delta**: {} ({:?}%)\n",
                self.host_delta, self.host_delta_pct
            ),
        ];

        if !self.host_added.is_empty() {
            lines.push("## Hosts Added".into());
            lines.extend(self.host_added.iter().map(|h| format!("- `{h}`")));
            lines.push(String::new());
        }

        if !self.host_removed.is_empty() {
            lines.push("## Hosts Removed".into());
            lines.extend(self.host_removed.iter().map(|h| format!("- `{h}`")));
            lines.push(String::new());
        }

        lines.push("## Variable Changes (across common hosts)".into());
        lines.push(format!(
            "- **Total var changes**: {} ({:?}%)",
            self.var_changes_total, self.var_change_pct
        ));
        lines.push(format!(
            "- **Baseline var keys**: {}\n",
            self.var_baseline_keys
        ));

        if !self.sample_per_host_changes.is_empty() {
            lines.push("### Sample per-host changes".into());
            for (host, changes) in &self.sample_per_host_changes {
                lines.push(format!("- **{host}**"));
                for (label, keys) in [
                    ("added", &changes.added_keys),
                    ("removed", &changes.removed_keys),
                    ("value changes", &changes.changed_keys),
                ] {
                    if !keys.is_empty() {
                        lines.push(format!("  - {label}: {}", code_list(keys)));
                    }
                }
            }
            lines.push(String::new());
        }

        let lim = &self.limits;
        lines.push("## Limits".into());
        lines.push(format!("- max_host_change_pct: {:?}", lim.max_host_change_pct));
        lines.push(format!("- max_var_change_pct: {:?}", lim.max_var_change_pct));
        lines.push(format!("- max_host_change_abs: {}", lim.max_host_change_abs));
        lines.push(format!("- max_var_change_abs: {}", lim.max_var_change_abs));
        if !lim.ignored_key_regex.is_empty() {
            lines.push(format!(
                "- ignored_key_regex: {}",
                code_list(&lim.ignored_key_regex)
            ));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn code_list(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("`{i}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
