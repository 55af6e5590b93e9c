//! What the account button shows.

use super::transactions::{has_pending_transaction, TransactionRegistry};

/// Characters kept at the start of a shortened account
const ACCOUNT_PREFIX_LEN: usize = 6;
/// Characters kept at the end of a shortened account
const ACCOUNT_SUFFIX_LEN: usize = 4;

/// `0x52908400098527886E0F7030069857D2E4169EE7` → `0x5290...9EE7`
pub fn shorten_account(account: &str) -> String {
    shared::utils::format_address(account, ACCOUNT_PREFIX_LEN, ACCOUNT_SUFFIX_LEN)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountButtonView {
    /// Connected; opens the account modal
    Account { short: String, has_pending: bool },
    /// No network yet; button is inert
    WaitingForNetwork,
    /// Network up, no account; button starts a connection
    Connect,
}

impl AccountButtonView {
    pub fn derive(account: Option<&str>, network_connected: bool, transactions: &TransactionRegistry) -> Self {
        match account {
            Some(account) => AccountButtonView::Account {
                short: shorten_account(account),
                has_pending: has_pending_transaction(transactions),
            },
            None if !network_connected => AccountButtonView::WaitingForNetwork,
            None => AccountButtonView::Connect,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AccountButtonView::Account { short, .. } => short.as_str(),
            AccountButtonView::WaitingForNetwork => "Waiting for network",
            AccountButtonView::Connect => "Connect",
        }
    }
}
