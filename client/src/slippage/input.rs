//! Transient state behind the custom slippage text field.

use super::{format_percent, is_custom_tolerance, ClassifiedSlippage, SlippageTolerance, SlippageValidator};

/// Raw text plus the feedback shown under the field.
///
/// Created when the control mounts, seeded from the persisted tolerance, and
/// dropped when the control unmounts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlippageInputState {
    raw: String,
    error: Option<String>,
    warning: Option<String>,
}

impl SlippageInputState {
    pub fn new(current: SlippageTolerance) -> Self {
        Self {
            raw: format_percent(current.fraction()),
            error: None,
            warning: None,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Handle a keystroke in the custom field.
    ///
    /// The field keeps the text as typed (`0.` stays `0.`, a cleared field stays
    /// empty) while accepted values are persisted right away.
    pub fn on_input(&mut self, raw: &str, validator: &SlippageValidator) -> ClassifiedSlippage {
        let outcome = validator.submit(raw);
        self.set_feedback(&outcome);
        self.raw = raw.to_string();
        outcome
    }

    /// Field lost focus: show the persisted tolerance as `fraction * 100`.
    ///
    /// Rejected text stays in the field so the user can correct it.
    pub fn commit(&mut self, validator: &SlippageValidator) {
        if self.error.is_none() {
            self.raw = format_percent(validator.current().fraction());
        }
    }

    /// Handle a click on a preset button.
    pub fn select_preset(&mut self, fraction: f64, validator: &SlippageValidator) -> ClassifiedSlippage {
        let outcome = validator.select_preset(fraction);
        self.set_feedback(&outcome);
        if let Some(fraction) = outcome.fraction() {
            self.raw = format_percent(fraction);
        }
        outcome
    }

    /// Whether the custom field should be highlighted instead of a preset.
    pub fn is_custom(&self, validator: &SlippageValidator) -> bool {
        is_custom_tolerance(validator.current(), validator.presets())
    }

    fn set_feedback(&mut self, outcome: &ClassifiedSlippage) {
        self.error = outcome.error().map(ToString::to_string);
        self.warning = outcome.warning().map(|w| w.message().to_string());
    }
}
