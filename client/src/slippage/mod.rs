//! # Slippage Tolerance
//!
//! Turns what the user types into the slippage field (or the preset they click)
//! into the active slippage tolerance.
//!
//! ## Flow
//!
//! ```text
//! raw text ──► classify ──► Valid / Warning ──► ToleranceStore::set
//!                      └──► Error ───────────► nothing persisted
//! ```
//!
//! Tolerances are fractions (`0.005` = 0.5%); the text field and the presets
//! are percentages. An invalid value never reaches the store: the store only ever
//! holds a previously accepted value or the configured default.
//!
//! ## Modules
//!
//! - [`validator`]: `classify` and the store-writing [`SlippageValidator`]
//! - [`input`]: transient text-field state ([`SlippageInputState`])
//! - [`presets`]: one-click tolerances and percentage formatting

pub mod input;
pub mod presets;
pub mod validator;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use input::SlippageInputState;
pub use presets::{format_percent, is_custom_tolerance, preset_label, SLIPPAGE_PRESETS};
pub use validator::{classify, classify_fraction, SlippageValidator};

/// Active slippage tolerance as a fraction of the quoted amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlippageTolerance(f64);

impl SlippageTolerance {
    pub const fn from_fraction(fraction: f64) -> Self {
        Self(fraction)
    }

    pub fn from_percent(percent: f64) -> Self {
        Self(percent / 100.0)
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for SlippageTolerance {
    /// 0.5%
    fn default() -> Self {
        Self(0.005)
    }
}

impl fmt::Display for SlippageTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", format_percent(self.0))
    }
}

/// Thresholds applied to a candidate fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlippagePolicy {
    /// Fractions at or above this are rejected
    pub max_fraction: f64,
    /// Fractions at or above this are accepted with a warning
    pub high_fraction: f64,
}

impl SlippagePolicy {
    pub const MAX_FRACTION: f64 = 0.5;
    pub const HIGH_FRACTION: f64 = 0.05;

    pub fn new(max_fraction: f64, high_fraction: f64) -> Self {
        Self {
            max_fraction,
            high_fraction,
        }
    }
}

impl Default for SlippagePolicy {
    fn default() -> Self {
        Self::new(Self::MAX_FRACTION, Self::HIGH_FRACTION)
    }
}

/// Why a slippage value was rejected.
///
/// Both variants carry the same user-facing message; the variant only matters
/// for logging.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlippageError {
    #[error("Enter a valid slippage value")]
    NotANumber { input: String },

    #[error("Enter a valid slippage value")]
    TooHigh { fraction: f64 },
}

/// Accepted-but-questionable tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlippageWarning {
    /// At or above the policy's high threshold
    High,
    /// Below zero
    Negative,
}

impl SlippageWarning {
    pub fn message(&self) -> &'static str {
        match self {
            SlippageWarning::High => "You might consider a lower slippage tolerance",
            SlippageWarning::Negative => "Your transaction may fail",
        }
    }
}

impl fmt::Display for SlippageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of classifying a candidate tolerance.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedSlippage {
    Valid { fraction: f64 },
    Warning { fraction: f64, warning: SlippageWarning },
    Error(SlippageError),
}

impl ClassifiedSlippage {
    /// Fraction to persist, `None` for errors.
    pub fn fraction(&self) -> Option<f64> {
        match self {
            ClassifiedSlippage::Valid { fraction } | ClassifiedSlippage::Warning { fraction, .. } => {
                Some(*fraction)
            }
            ClassifiedSlippage::Error(_) => None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.fraction().is_some()
    }

    pub fn error(&self) -> Option<&SlippageError> {
        match self {
            ClassifiedSlippage::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn warning(&self) -> Option<SlippageWarning> {
        match self {
            ClassifiedSlippage::Warning { warning, .. } => Some(*warning),
            _ => None,
        }
    }

    /// Text shown under the field, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            ClassifiedSlippage::Valid { .. } => None,
            ClassifiedSlippage::Warning { warning, .. } => Some(warning.message().to_string()),
            ClassifiedSlippage::Error(err) => Some(err.to_string()),
        }
    }

    /// Converts to a `Result`, keeping warnings on the success side.
    pub fn into_result(self) -> Result<SlippageTolerance, SlippageError> {
        match self {
            ClassifiedSlippage::Valid { fraction } | ClassifiedSlippage::Warning { fraction, .. } => {
                Ok(SlippageTolerance::from_fraction(fraction))
            }
            ClassifiedSlippage::Error(err) => Err(err),
        }
    }
}
