//! One-click slippage tolerances and percentage formatting.

use super::SlippageTolerance;

/// Preset tolerances offered next to the custom field, as fractions
pub const SLIPPAGE_PRESETS: &[f64] = &[
    0.001, // 0.1%
    0.005, // 0.5%
    0.01,  // 1.0%
];

/// Digits kept when turning a fraction back into percentage text.
const PERCENT_DECIMALS: i32 = 10;

/// Format a fraction as the percentage text shown in the input field.
///
/// Strips float noise from `fraction * 100` so `0.0007` shows as `0.07`, and
/// drops a trailing `.0` the way the field displays whole percentages.
///
/// ```rust
/// use dapp_client::slippage::format_percent;
///
/// assert_eq!(format_percent(0.005), "0.5");
/// assert_eq!(format_percent(0.01), "1");
/// assert_eq!(format_percent(0.0007), "0.07");
/// ```
pub fn format_percent(fraction: f64) -> String {
    let percent = fraction * 100.0;
    if !percent.is_finite() {
        return percent.to_string();
    }
    let scale = 10f64.powi(PERCENT_DECIMALS);
    let rounded = (percent * scale).round() / scale;
    // -0 would otherwise render as "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    rounded.to_string()
}

/// Whether the active tolerance is something other than one of `presets`.
///
/// The custom field is highlighted in that case.
pub fn is_custom_tolerance(current: SlippageTolerance, presets: &[f64]) -> bool {
    !presets.contains(&current.fraction())
}

/// Label for a preset button, e.g. `"0.5%"`.
pub fn preset_label(fraction: f64) -> String {
    format!("{}%", format_percent(fraction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.001), "0.1");
        assert_eq!(format_percent(0.005), "0.5");
        assert_eq!(format_percent(0.05), "5");
        assert_eq!(format_percent(0.0), "0");
        assert_eq!(format_percent(-0.01), "-1");
    }

    #[test]
    fn test_preset_labels() {
        let labels: Vec<String> = SLIPPAGE_PRESETS.iter().map(|f| preset_label(*f)).collect();
        assert_eq!(labels, vec!["0.1%", "0.5%", "1%"]);
    }

    #[test]
    fn test_is_custom_tolerance() {
        assert!(!is_custom_tolerance(SlippageTolerance::from_fraction(0.005), SLIPPAGE_PRESETS));
        assert!(!is_custom_tolerance(SlippageTolerance::from_fraction(0.01), SLIPPAGE_PRESETS));
        assert!(is_custom_tolerance(SlippageTolerance::from_fraction(0.02), SLIPPAGE_PRESETS));
        assert!(!is_custom_tolerance(SlippageTolerance::from_fraction(0.02), &[0.02]));
    }
}
