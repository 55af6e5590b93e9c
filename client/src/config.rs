//! # Client Configuration
//!
//! Loaded from an optional JSON file, then overridden from the environment.
//!
//! ```json
//! {
//!   "default_slippage_tolerance": 0.5,
//!   "max_slippage": 0.5,
//!   "high_slippage": 0.05,
//!   "slippage_presets": [0.001, 0.005, 0.01],
//!   "session_file": "./dapp-session.json"
//! }
//! ```
//!
//! Environment overrides:
//! - `DAPP_CONFIG`: config file path (default `./dapp-config.json`)
//! - `DAPP_DEFAULT_SLIPPAGE`: default slippage, in percent
//! - `DAPP_SESSION_FILE`: session file path

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{AppError, Result};
use crate::slippage::{SlippagePolicy, SlippageTolerance, SLIPPAGE_PRESETS};

/// Get default config file path
pub fn get_config_path() -> PathBuf {
    std::env::var("DAPP_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./dapp-config.json"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Used when the slippage field is empty, in percent
    pub default_slippage_tolerance: f64,
    /// Fraction at or above which slippage is rejected
    pub max_slippage: f64,
    /// Fraction at or above which slippage is accepted with a warning
    pub high_slippage: f64,
    /// Preset fractions offered as one-click buttons
    pub slippage_presets: Vec<f64>,
    /// Where the saved connector is persisted
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_slippage_tolerance: 0.5,
            max_slippage: SlippagePolicy::MAX_FRACTION,
            high_slippage: SlippagePolicy::HIGH_FRACTION,
            slippage_presets: SLIPPAGE_PRESETS.to_vec(),
            session_file: PathBuf::from("./dapp-session.json"),
        }
    }
}

impl ClientConfig {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        let config: ClientConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Apply `DAPP_*` environment overrides.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(value) = std::env::var("DAPP_DEFAULT_SLIPPAGE") {
            self.default_slippage_tolerance = value.trim().parse().map_err(|_| {
                AppError::Config(format!("DAPP_DEFAULT_SLIPPAGE is not a number: {:?}", value))
            })?;
        }
        if let Ok(path) = std::env::var("DAPP_SESSION_FILE") {
            self.session_file = PathBuf::from(path);
        }
        Ok(self)
    }

    /// File at [`get_config_path`], then environment, then validation.
    pub fn load() -> Result<Self> {
        let path = get_config_path();
        let config = Self::load_from_file(&path)?.with_env_overrides()?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            default_slippage = config.default_slippage_tolerance,
            max_slippage = config.max_slippage,
            high_slippage = config.high_slippage,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Reject thresholds that would make classification meaningless.
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("default_slippage_tolerance", self.default_slippage_tolerance),
            ("max_slippage", self.max_slippage),
            ("high_slippage", self.high_slippage),
        ];
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AppError::Config(format!("{} must be a finite number", name)));
        }
        if self.max_slippage <= 0.0 {
            return Err(AppError::Config("max_slippage must be positive".to_string()));
        }
        if self.high_slippage > self.max_slippage {
            return Err(AppError::Config(format!(
                "high_slippage ({}) exceeds max_slippage ({})",
                self.high_slippage, self.max_slippage
            )));
        }
        if self.default_tolerance().fraction() >= self.max_slippage {
            return Err(AppError::Config(format!(
                "default_slippage_tolerance ({}%) is not below max_slippage",
                self.default_slippage_tolerance
            )));
        }
        Ok(())
    }

    pub fn policy(&self) -> SlippagePolicy {
        SlippagePolicy::new(self.max_slippage, self.high_slippage)
    }

    pub fn default_tolerance(&self) -> SlippageTolerance {
        SlippageTolerance::from_percent(self.default_slippage_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("dapp-config-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        config.validate().unwrap();
        assert_eq!(config.policy(), SlippagePolicy::default());
        assert_eq!(config.default_tolerance().fraction(), 0.005);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = ClientConfig::load_from_file(&scratch_path()).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = scratch_path();
        std::fs::write(&path, r#"{ "default_slippage_tolerance": 1.0 }"#).unwrap();

        let config = ClientConfig::load_from_file(&path).unwrap();
        assert_eq!(config.default_slippage_tolerance, 1.0);
        assert_eq!(config.max_slippage, 0.5);
        assert_eq!(config.slippage_presets, vec![0.001, 0.005, 0.01]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let path = scratch_path();
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(ClientConfig::load_from_file(&path), Err(AppError::Config(_))));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_validate_rejects_inconsistent_thresholds() {
        let config = ClientConfig {
            high_slippage: 0.6,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            default_slippage_tolerance: 50.0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            max_slippage: f64::NAN,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
