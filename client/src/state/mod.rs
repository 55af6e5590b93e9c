//! # Application State
//!
//! Process-wide state, held in [`SharedStore`]s and handed to whoever needs it.
//!
//! ## Stores
//!
//! | Store               | Written by                         | Survives reload |
//! |---------------------|------------------------------------|-----------------|
//! | `slippage`          | `SlippageValidator`                | no              |
//! | `account`           | wallet events                      | no              |
//! | `saved_connector`   | `App::connect_with` / `disconnect` | yes (session file) |
//! | `network_connected` | network status events              | no              |
//! | `transactions`      | the transaction registry owner     | no              |

pub mod session;
pub mod store;

pub use session::{PersistedSession, SessionFile};
pub use store::{SharedStore, StoreSubscription};

use crate::slippage::SlippageTolerance;
use crate::wallet::TransactionRegistry;

/// Every store the core reads or writes.
#[derive(Debug, Clone)]
pub struct ApplicationState {
    pub slippage: SharedStore<SlippageTolerance>,
    pub account: SharedStore<Option<String>>,
    pub saved_connector: SharedStore<Option<String>>,
    pub network_connected: SharedStore<bool>,
    pub transactions: SharedStore<TransactionRegistry>,
}

impl ApplicationState {
    /// Fresh state: default tolerance, no account, saved connector from the session.
    pub fn new(default_tolerance: SlippageTolerance, session: &PersistedSession) -> Self {
        Self {
            slippage: SharedStore::new(default_tolerance),
            account: SharedStore::new(None),
            saved_connector: SharedStore::new(session.saved_connector.clone()),
            network_connected: SharedStore::new(true),
            transactions: SharedStore::new(TransactionRegistry::default()),
        }
    }

    pub fn active_account(&self) -> Option<String> {
        self.account.get()
    }
}
