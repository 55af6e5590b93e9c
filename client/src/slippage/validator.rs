//! Slippage classification and persistence.

use std::sync::Arc;

use super::{
    ClassifiedSlippage, SlippageError, SlippagePolicy, SlippageTolerance, SlippageWarning, SLIPPAGE_PRESETS,
};
use crate::core::service::ToleranceStore;

/// Classify raw percentage text.
///
/// Empty text falls back to `default_percent`; whitespace-only text is `0`.
/// Anything that does not parse as a number is an error; so is a fraction at
/// or above `policy.max_fraction`.
///
/// ```rust
/// use dapp_client::slippage::{classify, ClassifiedSlippage, SlippagePolicy};
///
/// let policy = SlippagePolicy::default();
/// assert_eq!(classify("0.5", 0.5, &policy), ClassifiedSlippage::Valid { fraction: 0.005 });
/// assert_eq!(classify("", 0.5, &policy), ClassifiedSlippage::Valid { fraction: 0.005 });
/// assert!(classify("60", 0.5, &policy).error().is_some());
/// ```
pub fn classify(raw: &str, default_percent: f64, policy: &SlippagePolicy) -> ClassifiedSlippage {
    let percent = if raw.is_empty() {
        default_percent
    } else {
        match parse_percent(raw) {
            Some(percent) => percent,
            None => {
                return ClassifiedSlippage::Error(SlippageError::NotANumber {
                    input: raw.to_string(),
                })
            }
        }
    };
    classify_fraction(percent / 100.0, policy)
}

/// Classify a fraction that is already numeric (presets, stored values).
pub fn classify_fraction(fraction: f64, policy: &SlippagePolicy) -> ClassifiedSlippage {
    if fraction.is_nan() {
        return ClassifiedSlippage::Error(SlippageError::NotANumber {
            input: fraction.to_string(),
        });
    }
    if fraction >= policy.max_fraction {
        ClassifiedSlippage::Error(SlippageError::TooHigh { fraction })
    } else if fraction >= policy.high_fraction {
        ClassifiedSlippage::Warning {
            fraction,
            warning: SlippageWarning::High,
        }
    } else if fraction < 0.0 {
        ClassifiedSlippage::Warning {
            fraction,
            warning: SlippageWarning::Negative,
        }
    } else {
        ClassifiedSlippage::Valid { fraction }
    }
}

/// Surrounding whitespace is ignored and whitespace-only text reads as `0`;
/// `NaN` counts as unparseable.
fn parse_percent(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|value| !value.is_nan())
}

/// Classifies input and writes accepted values to the tolerance store.
#[derive(Clone)]
pub struct SlippageValidator {
    policy: SlippagePolicy,
    default_percent: f64,
    presets: Vec<f64>,
    store: Arc<dyn ToleranceStore>,
}

impl SlippageValidator {
    pub fn new(policy: SlippagePolicy, default_percent: f64, store: Arc<dyn ToleranceStore>) -> Self {
        Self {
            policy,
            default_percent,
            presets: SLIPPAGE_PRESETS.to_vec(),
            store,
        }
    }

    /// Replace the preset fractions offered next to the custom field.
    pub fn with_presets(mut self, presets: Vec<f64>) -> Self {
        self.presets = presets;
        self
    }

    pub fn presets(&self) -> &[f64] {
        &self.presets
    }

    pub fn policy(&self) -> &SlippagePolicy {
        &self.policy
    }

    pub fn default_percent(&self) -> f64 {
        self.default_percent
    }

    /// Currently persisted tolerance.
    pub fn current(&self) -> SlippageTolerance {
        self.store.get()
    }

    /// Classify without touching the store.
    pub fn classify(&self, raw: &str) -> ClassifiedSlippage {
        classify(raw, self.default_percent, &self.policy)
    }

    /// Classify manual input and persist it unless it is an error.
    pub fn submit(&self, raw: &str) -> ClassifiedSlippage {
        let outcome = self.classify(raw);
        self.persist(&outcome);
        outcome
    }

    /// Classify a preset fraction and persist it unless it is an error.
    ///
    /// Presets never go through the empty-text default.
    pub fn select_preset(&self, fraction: f64) -> ClassifiedSlippage {
        let outcome = classify_fraction(fraction, &self.policy);
        self.persist(&outcome);
        outcome
    }

    fn persist(&self, outcome: &ClassifiedSlippage) {
        match outcome {
            ClassifiedSlippage::Error(err) => {
                tracing::debug!(error = ?err, "Slippage rejected, keeping current tolerance");
            }
            ClassifiedSlippage::Valid { fraction } | ClassifiedSlippage::Warning { fraction, .. } => {
                let tolerance = SlippageTolerance::from_fraction(*fraction);
                self.store.set(tolerance);
                tracing::info!(
                    tolerance = %tolerance,
                    warning = ?outcome.warning(),
                    "Slippage tolerance updated"
                );
            }
        }
    }
}

impl std::fmt::Debug for SlippageValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlippageValidator")
            .field("policy", &self.policy)
            .field("default_percent", &self.default_percent)
            .field("presets", &self.presets)
            .field("current", &self.store.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SharedStore;

    fn validator() -> (SlippageValidator, SharedStore<SlippageTolerance>) {
        let store = SharedStore::new(SlippageTolerance::from_fraction(0.01));
        let validator = SlippageValidator::new(SlippagePolicy::default(), 0.5, Arc::new(store.clone()));
        (validator, store)
    }

    // ========== classify ==========

    #[test]
    fn test_valid_input() {
        let policy = SlippagePolicy::default();
        assert_eq!(classify("0.5", 0.5, &policy), ClassifiedSlippage::Valid { fraction: 0.005 });
        assert_eq!(classify("0", 0.5, &policy), ClassifiedSlippage::Valid { fraction: 0.0 });
        assert_eq!(classify("4.99", 0.5, &policy).warning(), None);
    }

    #[test]
    fn test_empty_input_uses_default() {
        let policy = SlippagePolicy::default();
        assert_eq!(classify("", 0.5, &policy), classify("0.5", 0.5, &policy));
        assert_eq!(classify("", 1.0, &policy), ClassifiedSlippage::Valid { fraction: 0.01 });
    }

    #[test]
    fn test_non_numeric_input_is_error() {
        let policy = SlippagePolicy::default();
        for raw in ["abc", "0.5%", "1,5", "NaN", "--1"] {
            let outcome = classify(raw, 0.5, &policy);
            assert!(
                matches!(outcome, ClassifiedSlippage::Error(SlippageError::NotANumber { .. })),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn test_whitespace_around_number_is_ignored() {
        let policy = SlippagePolicy::default();
        assert_eq!(classify(" 1 ", 0.5, &policy), ClassifiedSlippage::Valid { fraction: 0.01 });
    }

    #[test]
    fn test_whitespace_only_input_is_zero() {
        let policy = SlippagePolicy::default();
        assert_eq!(classify(" ", 0.5, &policy), ClassifiedSlippage::Valid { fraction: 0.0 });
        assert_eq!(classify("\t\n", 0.5, &policy), ClassifiedSlippage::Valid { fraction: 0.0 });
    }

    #[test]
    fn test_submit_whitespace_persists_zero() {
        let (validator, store) = validator();
        assert_eq!(validator.submit("  "), ClassifiedSlippage::Valid { fraction: 0.0 });
        assert_eq!(store.get().fraction(), 0.0);
    }

    #[test]
    fn test_at_or_above_max_is_error() {
        let policy = SlippagePolicy::default();
        for raw in ["50", "60", "100", "1e3", "inf"] {
            let outcome = classify(raw, 0.5, &policy);
            assert!(
                matches!(outcome, ClassifiedSlippage::Error(SlippageError::TooHigh { .. })),
                "{raw:?} should be too high"
            );
            assert_eq!(outcome.message().as_deref(), Some("Enter a valid slippage value"));
        }
    }

    #[test]
    fn test_high_range_is_warning() {
        let policy = SlippagePolicy::default();
        assert_eq!(
            classify("5", 0.5, &policy),
            ClassifiedSlippage::Warning {
                fraction: 0.05,
                warning: SlippageWarning::High
            }
        );
        assert_eq!(
            classify("49.99", 0.5, &policy).warning(),
            Some(SlippageWarning::High)
        );
        assert_eq!(classify("10", 0.5, &policy).fraction(), Some(0.1));
    }

    #[test]
    fn test_negative_is_warning() {
        let policy = SlippagePolicy::default();
        assert_eq!(
            classify_fraction(-0.01, &policy),
            ClassifiedSlippage::Warning {
                fraction: -0.01,
                warning: SlippageWarning::Negative
            }
        );
        assert_eq!(
            classify("-1", 0.5, &policy).message().as_deref(),
            Some("Your transaction may fail")
        );
    }

    #[test]
    fn test_custom_policy() {
        let policy = SlippagePolicy::new(0.1, 0.02);
        assert!(classify("10", 0.5, &policy).error().is_some());
        assert_eq!(classify("3", 0.5, &policy).warning(), Some(SlippageWarning::High));
        assert_eq!(classify("1", 0.5, &policy), ClassifiedSlippage::Valid { fraction: 0.01 });
    }

    // ========== SlippageValidator ==========

    #[test]
    fn test_submit_valid_persists() {
        let (validator, store) = validator();
        let outcome = validator.submit("0.5");
        assert_eq!(outcome, ClassifiedSlippage::Valid { fraction: 0.005 });
        assert_eq!(store.get().fraction(), 0.005);
    }

    #[test]
    fn test_submit_warning_persists() {
        let (validator, store) = validator();
        validator.submit("20");
        assert_eq!(store.get().fraction(), 0.2);
    }

    #[test]
    fn test_submit_error_leaves_store_untouched() {
        let (validator, store) = validator();
        validator.submit("60");
        assert_eq!(store.get().fraction(), 0.01);
        validator.submit("abc");
        assert_eq!(store.get().fraction(), 0.01);
        assert_eq!(validator.current().fraction(), 0.01);
    }

    #[test]
    fn test_submit_empty_persists_default() {
        let (validator, store) = validator();
        assert_eq!(validator.submit(""), ClassifiedSlippage::Valid { fraction: 0.005 });
        assert_eq!(store.get().fraction(), 0.005);
    }

    #[test]
    fn test_select_preset_persists_fraction() {
        let (validator, store) = validator();
        let outcome = validator.select_preset(0.001);
        assert_eq!(outcome, ClassifiedSlippage::Valid { fraction: 0.001 });
        assert_eq!(store.get().fraction(), 0.001);
    }

    #[test]
    fn test_custom_presets() {
        let (validator, _) = validator();
        assert_eq!(validator.presets(), SLIPPAGE_PRESETS);
        let validator = validator.with_presets(vec![0.003]);
        assert_eq!(validator.presets(), &[0.003]);
    }

    #[test]
    fn test_select_negative_preset_warns_and_persists() {
        let (validator, store) = validator();
        let outcome = validator.select_preset(-0.002);
        assert_eq!(outcome.warning(), Some(SlippageWarning::Negative));
        assert_eq!(store.get().fraction(), -0.002);
    }
}
