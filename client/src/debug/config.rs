//! Debug configuration from environment variables

use std::path::PathBuf;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// Log file name inside `log_dir`, rotated daily
    pub log_file_name: String,
    /// Log level filter (e.g., "dapp_client=debug,info")
    pub log_level: String,
    /// Mirror log lines to stderr
    pub log_to_stderr: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_file_name: "dapp-client.log".to_string(),
            log_level: "dapp_client=info,warn".to_string(),
            log_to_stderr: false,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    ///
    /// - `RUST_LOG`: filter directives
    /// - `DAPP_LOG_DIR`: log directory (default `logs`)
    /// - `DAPP_LOG_STDERR`: `1` to also log to stderr
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_dir: std::env::var("DAPP_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_file_name: defaults.log_file_name,
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_to_stderr: std::env::var("DAPP_LOG_STDERR")
                .map(|v| v == "1")
                .unwrap_or(defaults.log_to_stderr),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(&self.log_file_name)
    }

    /// Check if debug logging is enabled; log lines then carry file and line
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.is_trace_enabled()
    }

    /// Check if trace logging is enabled; log lines then carry thread ids
    pub fn is_trace_enabled(&self) -> bool {
        self.log_level.contains("trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DebugConfig::default();
        assert_eq!(config.log_file(), PathBuf::from("logs").join("dapp-client.log"));
        assert!(!config.is_debug_enabled());
    }

    #[test]
    fn test_level_checks() {
        let config = DebugConfig {
            log_level: "dapp_client=trace".to_string(),
            ..DebugConfig::default()
        };
        assert!(config.is_trace_enabled());
        assert!(config.is_debug_enabled());
    }
}
