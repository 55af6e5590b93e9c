//! # Wallet
//!
//! Connector plumbing, silent reconnection, and the account button's derived state.
//!
//! ## Modules
//!
//! - [`connector`]: [`Connector`] trait, listener bookkeeping, [`ConnectorRegistry`]
//! - [`reconnect`]: [`ReconnectCoordinator`]
//! - [`account`]: account shortening and [`AccountButtonView`]
//! - [`transactions`]: [`TransactionRegistry`] and pending detection

pub mod account;
pub mod connector;
pub mod reconnect;
pub mod transactions;

use thiserror::Error;

pub use account::{shorten_account, AccountButtonView};
pub use connector::{
    Connector, ConnectorListener, ConnectorRegistry, ListenerId, ListenerTable, Subscription,
    CONNECTOR_UPDATE_EVENT,
};
pub use reconnect::{should_reconnect, ReconnectCoordinator, ReconnectState};
pub use transactions::{has_pending_transaction, TransactionRegistry};

/// Wallet activation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// The user declined the connection request
    #[error("Connection rejected: {0}")]
    Rejected(String),

    /// Provider missing or unreachable
    #[error("Connector unavailable: {0}")]
    Unavailable(String),

    /// Anything else the connector reports
    #[error("Connector error: {0}")]
    Connector(String),
}
