use serde::{Deserialize, Serialize};

use crate::error::GateError;

/// Default maximum host churn, in percent of the current host count.
pub const DEFAULT_MAX_HOST_CHANGE_PCT: f64 = 5.0;
/// Default maximum variable churn, in percent of the baseline key count.
pub const DEFAULT_MAX_VAR_CHANGE_PCT: f64 = 2.0;
/// Default absolute host churn cap (0 disables the cap).
pub const DEFAULT_MAX_HOST_CHANGE_ABS: u64 = 0;
/// Default absolute variable churn cap (0 disables the cap).
pub const DEFAULT_MAX_VAR_CHANGE_ABS: u64 = 0;

/// Churn limits for one guard run.
///
/// The percentage limits always apply. The absolute caps apply only when
/// non-zero: `0` means "no absolute limit", not "nothing allowed".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum `host_delta / current_hosts * 100`.
    pub max_host_change_pct: f64,
    /// Maximum `var_changes_total / var_baseline_keys * 100`.
    pub max_var_change_pct: f64,
    /// Maximum `host_delta`, or 0 for no cap.
    pub max_host_change_abs: u64,
    /// Maximum `var_changes_total`, or 0 for no cap.
    pub max_var_change_abs: u64,
    /// Variable keys excluded from comparison, as regex sources.
    pub ignored_key_regex: Vec<String>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_host_change_pct: DEFAULT_MAX_HOST_CHANGE_PCT,
            max_var_change_pct: DEFAULT_MAX_VAR_CHANGE_PCT,
            max_host_change_abs: DEFAULT_MAX_HOST_CHANGE_ABS,
            max_var_change_abs: DEFAULT_MAX_VAR_CHANGE_ABS,
            ignored_key_regex: Vec::new(),
        }
    }
}

impl Limits {
    /// Check that both percentage limits are non-negative numbers.
    pub fn validate(&self) -> Result<(), GateError> {
        for (name, value) in [
            ("max_host_change_pct", self.max_host_change_pct),
            ("max_var_change_pct", self.max_var_change_pct),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(GateError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let l = Limits::default();
        assert_eq!(l.max_host_change_pct, 5.0);
        assert_eq!(l.max_var_change_pct, 2.0);
        assert_eq!(l.max_host_change_abs, 0);
        assert_eq!(l.max_var_change_abs, 0);
        assert!(l.ignored_key_regex.is_empty());
        assert!(l.validate().is_ok());
    }

    #[test]
    fn negative_pct_rejected() {
        let l = Limits {
            max_var_change_pct: -1.0,
            ..Limits::default()
        };
        assert_eq!(
            l.validate(),
            Err(GateError::Config(
                "max_var_change_pct must be a non-negative number, got -1".into()
            ))
        );
    }

    #[test]
    fn nan_pct_rejected() {
        let l = Limits {
            max_host_change_pct: f64::NAN,
            ..Limits::default()
        };
        assert!(l.validate().is_err());
    }

    #[test]
    fn infinite_pct_allowed() {
        let l = Limits {
            max_host_change_pct: f64::INFINITY,
            ..Limits::default()
        };
        assert!(l.validate().is_ok());
    }

    #[test]
    fn serde_roundtrip_field_names() {
        let json = serde_json::to_value(Limits::default()).unwrap();
        assert_eq!(json["max_host_change_pct"], serde_json::json!(5.0));
        assert_eq!(json["ignored_key_regex"], serde_json::json!([]));
    }
}
