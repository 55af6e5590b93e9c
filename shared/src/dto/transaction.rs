use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A transaction submitted from the client, tracked until its receipt arrives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionDetails {
    pub hash: String,
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub added_time: DateTime<Utc>,
    /// `None` while the transaction is still pending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<TransactionReceipt>,
}

impl TransactionDetails {
    pub fn new(hash: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            from: from.into(),
            summary: None,
            added_time: Utc::now(),
            receipt: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn is_pending(&self) -> bool {
        self.receipt.is_none()
    }
}

/// Receipt attached to a mined transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub block_number: u64,
    /// 1 = success, 0 = reverted
    pub status: u8,
    pub confirmed_time: DateTime<Utc>,
}

impl TransactionReceipt {
    /// Receipt confirmed now
    pub fn new(block_number: u64, status: u8) -> Self {
        Self {
            block_number,
            status,
            confirmed_time: Utc::now(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == 1
    }
}
