//! # Common Error Types
//!
//! Consolidated error handling for the client core.
//!
//! This module provides a centralized error type [`AppError`] that covers all error
//! scenarios the core can surface to its caller.
//!
//! ## Error Categories
//! Errors are categorized by their source:
//!
//! - **Validation**: Slippage input rejected (not a number, above the maximum)
//! - **Connection**: Wallet activation failures reported by a connector
//! - **State**: Session state that could not be read or written
//! - **Config**: Configuration file or environment values that are unusable
//!
//! None of these are fatal. Validation and connection failures are absorbed
//! locally and turned into transient UI feedback or a diagnostics entry.
//!
//! ## Usage Pattern
//!
//! ```rust
//! use dapp_client::core::error::AppError;
//!
//! fn require_account(account: Option<&str>) -> Result<&str, AppError> {
//!     account.ok_or_else(|| AppError::State("No active account".to_string()))
//! }
//! ```
//!
//! ## Error Conversion
//!
//! Module errors automatically convert to `AppError`:
//!
//! - [`SlippageError`] → `AppError::Validation`
//! - [`ConnectionError`] → `AppError::Connection`
//! - `std::io::Error` → `AppError::State`
//! - `serde_json::Error` → `AppError::Config`

use thiserror::Error;

use crate::slippage::SlippageError;
use crate::wallet::ConnectionError;

/// Application-wide error type covering all error scenarios in the client core.
///
/// Each variant includes a descriptive `String` message for context. The `#[error]`
/// attribute from `thiserror` provides automatic `Display` and `Error` implementations.
///
/// # Example
///
/// ```rust
/// use dapp_client::core::error::AppError;
///
/// let validation_err = AppError::Validation("Enter a valid slippage value".to_string());
/// let connection_err = AppError::Connection("User rejected the request".to_string());
///
/// assert_eq!(validation_err.to_string(), "Validation error: Enter a valid slippage value");
/// assert_eq!(connection_err.to_string(), "Connection error: User rejected the request");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Slippage input validation error.
    ///
    /// Always recoverable and user-correctable. The rejected value is never persisted.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Wallet activation error.
    ///
    /// Logged and recorded in diagnostics, never retried automatically.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Session state error.
    ///
    /// Used when the persisted session (saved connector) cannot be read or written.
    #[error("State error: {0}")]
    State(String),

    /// Configuration error.
    ///
    /// Used for malformed config files and inconsistent slippage thresholds.
    #[error("Config error: {0}")]
    Config(String),
}

/// Convenience type alias for `Result<T, AppError>`.
///
/// ```rust
/// use dapp_client::core::error::Result;
///
/// fn operation() -> Result<String> {
///     Ok("success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, AppError>;

impl From<SlippageError> for AppError {
    fn from(err: SlippageError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ConnectionError> for AppError {
    fn from(err: ConnectionError) -> Self {
        AppError::Connection(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::State(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slippage_error_maps_to_validation() {
        let err: AppError = SlippageError::NotANumber {
            input: "abc".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: Enter a valid slippage value");
    }

    #[test]
    fn test_connection_error_maps_to_connection() {
        let err: AppError = ConnectionError::Rejected("user closed the popup".to_string()).into();
        assert!(matches!(err, AppError::Connection(_)));
        assert!(err.to_string().contains("user closed the popup"));
    }
}
