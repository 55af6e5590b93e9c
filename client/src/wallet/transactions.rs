//! Submitted transactions, tracked until a receipt arrives.

use std::collections::HashMap;

use shared::dto::{TransactionDetails, TransactionReceipt};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionRegistry {
    transactions: HashMap<String, TransactionDetails>,
}

impl TransactionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly submitted transaction. Re-adding a hash replaces it.
    pub fn add(&mut self, details: TransactionDetails) {
        tracing::debug!(hash = %details.hash, "Tracking transaction");
        self.transactions.insert(details.hash.clone(), details);
    }

    /// Attach a receipt. Returns `false` for an unknown hash.
    pub fn finalize(&mut self, hash: &str, receipt: TransactionReceipt) -> bool {
        match self.transactions.get_mut(hash) {
            Some(tx) => {
                tracing::debug!(hash, block = receipt.block_number, success = receipt.succeeded(), "Transaction finalized");
                tx.receipt = Some(receipt);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, hash: &str) -> Option<&TransactionDetails> {
        self.transactions.get(hash)
    }

    pub fn all(&self) -> impl Iterator<Item = &TransactionDetails> {
        self.transactions.values()
    }

    pub fn pending_count(&self) -> usize {
        self.transactions.values().filter(|tx| tx.is_pending()).count()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
    }
}

/// True when any tracked transaction has no receipt yet.
pub fn has_pending_transaction(registry: &TransactionRegistry) -> bool {
    registry.all().any(TransactionDetails::is_pending)
}
