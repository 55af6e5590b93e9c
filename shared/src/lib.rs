//! # Shared Types Library
//!
//! Types and helpers shared between the client core and anything that renders it.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::transaction`]**: Submitted transactions and receipts
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format account addresses for display
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::TransactionDetails;
//! use shared::utils::format_address;
//!
//! let tx = TransactionDetails::new("0x5e1d", "0x52908400098527886E0F7030069857D2E4169EE7");
//! assert!(tx.is_pending());
//! assert_eq!(format_address(&tx.from, 6, 4), "0x5290...9EE7");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
