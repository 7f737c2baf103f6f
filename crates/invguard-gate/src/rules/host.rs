use invguard_types::ChurnMetrics;

use crate::config::Limits;
use crate::rule::{RuleDecision, ThresholdRule};

/// Host churn as a percentage of the current host count.
pub struct HostChangePctRule;

impl ThresholdRule for HostChangePctRule {
    fn name(&self) -> &str {
        "host-change-pct"
    }

    fn evaluate(&self, metrics: &ChurnMetrics, limits: &Limits) -> RuleDecision {
        let pct = metrics.host_delta_pct();
        if pct > limits.max_host_change_pct {
            RuleDecision::Fail {
                reason: format!(
                    "Host delta {} ({pct:.2}%) exceeds limit {:?}%.",
                    metrics.host_delta, limits.max_host_change_pct
                ),
            }
        } else {
            RuleDecision::Pass
        }
    }
}

/// Absolute host churn cap. A cap of 0 disables the rule.
pub struct HostChangeAbsRule;

impl ThresholdRule for HostChangeAbsRule {
    fn name(&self) -> &str {
        "host-change-abs"
    }

    fn evaluate(&self, metrics: &ChurnMetrics, limits: &Limits) -> RuleDecision {
        let cap = limits.max_host_change_abs;
        if cap == 0 {
            return RuleDecision::Disabled;
        }
        if metrics.host_delta as u64 > cap {
            RuleDecision::Fail {
                reason: format!(
                    "Host delta {} exceeds absolute cap {cap}.",
                    metrics.host_delta
                ),
            }
        } else {
            RuleDecision::Pass
        }
    }
}
