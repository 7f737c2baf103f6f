//! Threshold gate for Inventory Guard.
//!
//! Every inventory comparison ends in the gate. The gate runs a fixed
//! pipeline of churn rules against the comparison's [`ChurnMetrics`] and
//! produces a pass/fail verdict naming the first violated rule.
//!
//! # Quick Start
//!
//! ```rust
//! use invguard_gate::{Limits, ThresholdGate};
//! use invguard_types::ChurnMetrics;
//!
//! let gate = ThresholdGate::with_default_rules(Limits::default());
//! let metrics = ChurnMetrics {
//!     current_hosts: 40,
//!     candidate_hosts: 41,
//!     host_delta: 1,
//!     var_changes_total: 0,
//!     var_baseline_keys: 400,
//! };
//! assert!(gate.evaluate(&metrics).is_pass());
//! ```
//!
//! [`ChurnMetrics`]: invguard_types::ChurnMetrics

pub mod config;
pub mod error;
pub mod gate;
pub mod rule;
pub mod rules;

// Re-exports for convenience.
pub use config::Limits;
pub use error::GateError;
pub use gate::{GateResult, ThresholdGate, Verdict};
pub use rule::{RuleDecision, RuleResult, ThresholdRule};
pub use rules::{HostChangeAbsRule, HostChangePctRule, VarChangeAbsRule, VarChangePctRule};

#[cfg(test)]
mod tests {
    use super::*;
    use invguard_types::ChurnMetrics;

    fn quiet() -> ChurnMetrics {
        ChurnMetrics {
            current_hosts: 10,
            candidate_hosts: 10,
            host_delta: 0,
            var_changes_total: 0,
            var_baseline_keys: 100,
        }
    }

    fn lenient() -> Limits {
        Limits {
            max_host_change_pct: 100.0,
            max_var_change_pct: 100.0,
            ..Limits::default()
        }
    }

    // -----------------------------------------------------------------------
    // 1. Default gate passes quiet metrics through every rule
    // -----------------------------------------------------------------------
    #[test]
    fn default_gate_passes_quiet_metrics() {
        let gate = ThresholdGate::with_default_rules(Limits::default());
        let result = gate.evaluate(&quiet());
        assert!(result.is_pass());
        assert_eq!(result.rule_results.len(), 4);
        assert!(result.rule_results.iter().all(RuleResult::passed));
        assert_eq!(result.rule_results[1].decision, RuleDecision::Disabled);
        assert_eq!(result.rule_results[3].decision, RuleDecision::Disabled);
    }

    // -----------------------------------------------------------------------
    // 2. Rule order is fixed
    // -----------------------------------------------------------------------
    #[test]
    fn default_rule_order() {
        let gate = ThresholdGate::with_default_rules(Limits::default());
        assert_eq!(gate.rule_count(), 4);
        let names: Vec<_> = gate
            .evaluate(&quiet())
            .rule_results
            .into_iter()
            .map(|r| r.rule_name)
            .collect();
        assert_eq!(
            names,
            vec!["host-change-pct", "host-change-abs", "var-change-pct", "var-change-abs"]
        );
    }

    // -----------------------------------------------------------------------
    // 3. First violation wins and stops the pipeline
    // -----------------------------------------------------------------------
    #[test]
    fn first_violation_is_reported() {
        let gate = ThresholdGate::with_default_rules(Limits {
            max_host_change_pct: 0.0,
            max_var_change_pct: 0.0,
            ..Limits::default()
        });
        let metrics = ChurnMetrics {
            host_delta: 1,
            var_changes_total: 5,
            ..quiet()
        };
        let result = gate.evaluate(&metrics);
        assert_eq!(result.rule_results.len(), 1);
        match &result.verdict {
            Verdict::Fail { rule, reason } => {
                assert_eq!(rule, "host-change-pct");
                assert!(reason.starts_with("Host delta 1"));
            }
            other => panic!("expected Fail, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // 4. Variable rules run once host rules pass
    // -----------------------------------------------------------------------
    #[test]
    fn var_violation_after_host_rules_pass() {
        let gate = ThresholdGate::with_default_rules(Limits {
            max_var_change_pct: 0.0,
            ..lenient()
        });
        let metrics = ChurnMetrics {
            var_changes_total: 1,
            ..quiet()
        };
        let result = gate.evaluate(&metrics);
        assert!(!result.is_pass());
        assert_eq!(result.rule_results.len(), 3);
        assert!(result.verdict.reason().unwrap().contains("Variable changes 1"));
    }

    // -----------------------------------------------------------------------
    // 5. Absolute caps trip independently of percentages
    // -----------------------------------------------------------------------
    #[test]
    fn absolute_caps_apply_when_set() {
        let gate = ThresholdGate::with_default_rules(Limits {
            max_host_change_abs: 1,
            ..lenient()
        });
        let metrics = ChurnMetrics {
            host_delta: 2,
            ..quiet()
        };
        let result = gate.evaluate(&metrics);
        assert_eq!(
            result.verdict,
            Verdict::Fail {
                rule: "host-change-abs".into(),
                reason: "Host delta 2 exceeds absolute cap 1.".into(),
            }
        );

        let gate = ThresholdGate::with_default_rules(Limits {
            max_var_change_abs: 2,
            ..lenient()
        });
        let metrics = ChurnMetrics {
            var_changes_total: 3,
            ..quiet()
        };
        let result = gate.evaluate(&metrics);
        assert_eq!(result.rule_results.len(), 4);
        assert!(result.verdict.reason().unwrap().contains("absolute cap 2"));
    }

    // -----------------------------------------------------------------------
    // 6. Empty pipeline always passes
    // -----------------------------------------------------------------------
    #[test]
    fn empty_pipeline_passes() {
        let gate = ThresholdGate::new(Limits::default());
        let metrics = ChurnMetrics {
            host_delta: 1000,
            ..quiet()
        };
        let result = gate.evaluate(&metrics);
        assert!(result.is_pass());
        assert!(result.rule_results.is_empty());
    }

    // -----------------------------------------------------------------------
    // 7. Custom rules slot into the pipeline
    // -----------------------------------------------------------------------
    struct NoNewHosts;

    impl ThresholdRule for NoNewHosts {
        fn name(&self) -> &str {
            "no-new-hosts"
        }

        fn evaluate(&self, metrics: &ChurnMetrics, _limits: &Limits) -> RuleDecision {
            if metrics.candidate_hosts > metrics.current_hosts {
                RuleDecision::Fail {
                    reason: "new hosts are frozen".into(),
                }
            } else {
                RuleDecision::Pass
            }
        }
    }

    #[test]
    fn custom_rule_runs_after_defaults() {
        let mut gate = ThresholdGate::with_default_rules(lenient());
        gate.add_rule(Box::new(NoNewHosts));
        let metrics = ChurnMetrics {
            candidate_hosts: 11,
            host_delta: 1,
            ..quiet()
        };
        let result = gate.evaluate(&metrics);
        assert_eq!(result.rule_results.len(), 5);
        assert_eq!(result.verdict.reason(), Some("new hosts are frozen"));
    }

    #[test]
    fn limits_accessor() {
        let gate = ThresholdGate::with_default_rules(lenient());
        assert_eq!(gate.limits().max_host_change_pct, 100.0);
    }
}
