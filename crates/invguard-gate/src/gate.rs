use invguard_types::ChurnMetrics;

use crate::config::Limits;
use crate::rule::{RuleDecision, RuleResult, ThresholdRule};
use crate::rules::{HostChangeAbsRule, HostChangePctRule, VarChangeAbsRule, VarChangePctRule};

// ---------------------------------------------------------------------------
// Verdict / GateResult
// ---------------------------------------------------------------------------

/// Final pass/fail outcome of a gate evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Every rule passed (or was disabled).
    Pass,
    /// The named rule was the first to fail.
    Fail { rule: String, reason: String },
}

impl Verdict {
    /// Returns `true` if the verdict is `Pass`.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// The failure reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Pass => None,
            Self::Fail { reason, .. } => Some(reason),
        }
    }
}

/// The outcome of running churn metrics through the full rule pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateResult {
    /// The final verdict.
    pub verdict: Verdict,
    /// Per-rule results in evaluation order, up to and including the first failure.
    pub rule_results: Vec<RuleResult>,
}

impl GateResult {
    /// Returns `true` if the metrics passed every rule.
    pub fn is_pass(&self) -> bool {
        self.verdict.is_pass()
    }
}

// ---------------------------------------------------------------------------
// ThresholdGate
// ---------------------------------------------------------------------------

/// The threshold gate: an ordered pipeline of rules evaluated against one
/// comparison's churn metrics.
pub struct ThresholdGate {
    rules: Vec<Box<dyn ThresholdRule>>,
    limits: Limits,
}

impl ThresholdGate {
    /// Create a gate with the given limits and an empty pipeline.
    ///
    /// Use [`Self::add_rule`] to add rules, or [`Self::with_default_rules`]
    /// for the standard pipeline.
    pub fn new(limits: Limits) -> Self {
        Self {
            rules: Vec::new(),
            limits,
        }
    }

    /// Create a gate with the default rule pipeline:
    /// host % -> host absolute -> variable % -> variable absolute
    pub fn with_default_rules(limits: Limits) -> Self {
        let mut gate = Self::new(limits);
        gate.add_rule(Box::new(HostChangePctRule));
        gate.add_rule(Box::new(HostChangeAbsRule));
        gate.add_rule(Box::new(VarChangePctRule));
        gate.add_rule(Box::new(VarChangeAbsRule));
        gate
    }

    /// Append a rule to the end of the pipeline.
    pub fn add_rule(&mut self, rule: Box<dyn ThresholdRule>) {
        self.rules.push(rule);
    }

    /// The active limits.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Number of rules in the pipeline.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Evaluate metrics through the full pipeline.
    ///
    /// The pipeline is **fail-fast**: the first failing rule stops evaluation
    /// and determines the reported reason, even if later rules would also
    /// fail. If no rule fails the verdict is `Pass`.
    pub fn evaluate(&self, metrics: &ChurnMetrics) -> GateResult {
        let mut rule_results = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let decision = rule.evaluate(metrics, &self.limits);
            tracing::debug!(rule = rule.name(), ?decision, "threshold rule evaluated");

            rule_results.push(RuleResult {
                rule_name: rule.name().to_string(),
                decision: decision.clone(),
            });

            if let RuleDecision::Fail { reason } = decision {
                return GateResult {
                    verdict: Verdict::Fail {
                        rule: rule.name().to_string(),
                        reason,
                    },
                    rule_results,
                };
            }
        }

        GateResult {
            verdict: Verdict::Pass,
            rule_results,
        }
    }
}
