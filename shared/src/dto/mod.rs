//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged between the client core and the collaborators that
//! feed it (the transaction registry, persisted session state).
//!
//! ## Module Organization
//!
//! - [`transaction`] - Submitted transactions and their receipts
//!
//! ## Serialization Format
//!
//! All DTOs use `serde_json` for JSON serialization:
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **All types**: Implement both `Serialize` and `Deserialize`
//!
//! ## Example JSON
//!
//! ```text
//! {
//!   "hash": "0x5e1d...c0de",
//!   "from": "0x52908400098527886E0F7030069857D2E4169EE7",
//!   "summary": "Swap 1.0 ETH for 1830.12 USDC",
//!   "added_time": "2024-01-01T00:00:00Z",
//!   "receipt": {
//!     "block_number": 17000000,
//!     "status": 1,
//!     "confirmed_time": "2024-01-01T00:00:12Z"
//!   }
//! }
//! ```

pub mod transaction;

pub use transaction::*;
