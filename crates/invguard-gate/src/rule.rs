use invguard_types::ChurnMetrics;

use crate::config::Limits;

// ---------------------------------------------------------------------------
// RuleDecision
// ---------------------------------------------------------------------------

/// The outcome of a single threshold rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleDecision {
    /// The measured churn is within the limit.
    Pass,
    /// The measured churn exceeds the limit.
    Fail { reason: String },
    /// The rule's limit is switched off (an absolute cap of 0).
    Disabled,
}

impl RuleDecision {
    /// Returns `true` if the decision is `Pass`.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns `true` if the decision is `Fail`.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }
}

// ---------------------------------------------------------------------------
// RuleResult
// ---------------------------------------------------------------------------

/// Recorded result of one rule evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleResult {
    /// Name of the rule that produced this result.
    pub rule_name: String,
    /// What the rule decided.
    pub decision: RuleDecision,
}

impl RuleResult {
    /// Returns `true` unless the rule failed.
    pub fn passed(&self) -> bool {
        !self.decision.is_fail()
    }
}

// ---------------------------------------------------------------------------
// ThresholdRule trait
// ---------------------------------------------------------------------------

/// A single check in the gate pipeline.
///
/// Rules are evaluated in order against the same metrics and limits. The
/// trait is object-safe and `Send + Sync` so rules can be stored in a
/// `Vec<Box<dyn ThresholdRule>>`.
pub trait ThresholdRule: Send + Sync {
    /// Stable rule name (e.g., "host-change-pct").
    fn name(&self) -> &str;

    /// Check the metrics against the limits.
    fn evaluate(&self, metrics: &ChurnMetrics, limits: &Limits) -> RuleDecision;
}
