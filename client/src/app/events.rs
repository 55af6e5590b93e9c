//! # Application Events
//!
//! Events sent to the main loop by connectors, the wallet library and the
//! reconnect coordinator's listener.

use shared::dto::{TransactionDetails, TransactionReceipt};

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The active connector changed state; rebuild everything
    ReloadRequested,
    /// A connector finished activating
    ConnectorActivated(String),
    /// Active account changed (None = disconnected)
    AccountChanged(Option<String>),
    /// Network reachability changed
    NetworkChanged(bool),
    /// A transaction was submitted
    TransactionAdded(TransactionDetails),
    /// A submitted transaction was mined
    TransactionFinalized {
        hash: String,
        receipt: TransactionReceipt,
    },
}
