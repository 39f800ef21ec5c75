//! Core data models for the transaction feed

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single transaction record as delivered by the feed.
///
/// Records are opaque values: the feed guarantees no unique identifier,
/// so there are no update-in-place semantics anywhere in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction amount
    pub amount: Decimal,
    /// Short currency code (e.g., "NGN")
    pub currency: String,
    /// Transaction timestamp
    pub date: DateTime<Utc>,
    /// Transaction status
    pub status: TransactionStatus,
    /// Display name of the user
    pub user: String,
}

/// Transaction status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Settled successfully
    Completed,
    /// Awaiting settlement
    Pending,
    /// Rejected or errored
    Failed,
    /// Reversed after settlement
    Refunded,
    /// Anything the feed sends that we do not recognize
    #[serde(other)]
    Other,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Other
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = std::convert::Infallible;

    /// Case-insensitive parse; unknown inputs map to `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "completed" => TransactionStatus::Completed,
            "pending" => TransactionStatus::Pending,
            "failed" => TransactionStatus::Failed,
            "refunded" => TransactionStatus::Refunded,
            _ => TransactionStatus::Other,
        })
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Failed => write!(f, "failed"),
            TransactionStatus::Refunded => write!(f, "refunded"),
            TransactionStatus::Other => write!(f, "other"),
        }
    }
}

impl Transaction {
    /// Formatted date for table display (YYYY-MM-DD)
    pub fn date_display(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

// ==================== Tests ====================
