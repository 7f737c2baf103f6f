use invguard_types::ChurnMetrics;

use crate::config::Limits;
use crate::rule::{RuleDecision, ThresholdRule};

/// Variable churn as a percentage of the baseline key count.
pub struct VarChangePctRule;

impl ThresholdRule for VarChangePctRule {
    fn name(&self) -> &str {
        "var-change-pct"
    }

    fn evaluate(&self, metrics: &ChurnMetrics, limits: &Limits) -> RuleDecision {
        let pct = metrics.var_change_pct();
        if pct > limits.max_var_change_pct {
            RuleDecision::Fail {
                reason: format!(
                    "Variable changes {} ({pct:.2}%) exceed limit {:?}%.",
                    metrics.var_changes_total, limits.max_var_change_pct
                ),
            }
        } else {
            RuleDecision::Pass
        }
    }
}

/// Absolute variable churn cap. A cap of 0 disables the rule.
pub struct VarChangeAbsRule;

impl ThresholdRule for VarChangeAbsRule {
    fn name(&self) -> &str {
        "var-change-abs"
    }

    fn evaluate(&self, metrics: &ChurnMetrics, limits: &Limits) -> RuleDecision {
        let cap = limits.max_var_change_abs;
        if cap == 0 {
            return RuleDecision::Disabled;
        }
        if metrics.var_changes_total as u64 > cap {
            RuleDecision::Fail {
                reason: format!(
                    "Variable changes {} exceed absolute cap {cap}.",
                    metrics.var_changes_total
                ),
            }
        } else {
            RuleDecision::Pass
        }
    }
}
