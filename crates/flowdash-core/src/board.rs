//! Canonical transaction state for a dashboard session
//!
//! The board holds the newest-first list of every transaction seen this
//! session, plus the loading flag that gates table rendering. It is created
//! when the dashboard view starts and discarded with it; nothing persists.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Aggregate statistics over the unfiltered canonical list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSummary {
    /// Sum of all amounts. Currency mixing is not reconciled; the feed is
    /// assumed to carry a single implicit currency.
    pub total_amount: Decimal,
    /// Number of records on the board
    pub count: usize,
}

/// The canonical in-memory transaction list and loading flag.
///
/// Mutation rules:
/// - a snapshot replaces the whole list,
/// - an incremental batch is prepended as a block, batch-internal order
///   preserved, the prior sequence untouched.
///
/// There is no deduplication and no capacity bound.
#[derive(Debug, Default)]
pub struct TransactionBoard {
    transactions: Vec<Transaction>,
    loading: bool,
}

impl TransactionBoard {
    /// Create an empty board. Loading starts true: the spinner shows until
    /// the snapshot arrives or the startup timeout fires.
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            loading: true,
        }
    }

    /// Replace the canonical list wholesale with a full snapshot.
    pub fn apply_snapshot(&mut self, snapshot: Vec<Transaction>) {
        self.transactions = snapshot;
        self.loading = false;
    }

    /// Prepend an incremental batch to the front of the canonical list.
    pub fn prepend_batch(&mut self, batch: Vec<Transaction>) {
        let prior = std::mem::take(&mut self.transactions);
        let mut next = batch;
        next.extend(prior);
        self.transactions = next;
    }

    /// Set the loading flag
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Whether the table should show a spinner instead of data
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The canonical list, newest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of records on the board
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the board holds no records
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Aggregates over the unfiltered canonical list
    pub fn summary(&self) -> BoardSummary {
        let total_amount = self
            .transactions
            .iter()
            .map(|tx| tx.amount)
            .sum::<Decimal>();
        BoardSummary {
            total_amount,
            count: self.transactions.len(),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionStatus;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn tx(user: &str, amount: i64) -> Transaction {
        Transaction {
            amount: Decimal::from(amount),
            currency: "NGN".to_string(),
            date: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
            status: TransactionStatus::Completed,
            user: user.to_string(),
        }
    }

    #[test]
    fn test_new_board_is_loading_and_empty() {
        let board = TransactionBoard::new();
        assert!(board.is_loading());
        assert!(board.is_empty());
    }

    #[test]
    fn test_snapshot_replaces_and_clears_loading() {
        let mut board = TransactionBoard::new();
        board.apply_snapshot(vec![tx("a", 1), tx("b", 2), tx("c", 3)]);
        assert!(!board.is_loading());
        assert_eq!(board.len(), 3);

        // A later snapshot is a wholesale replacement, not a merge
        board.apply_snapshot(vec![tx("d", 4)]);
        assert_eq!(board.len(), 1);
        assert_eq!(board.transactions()[0].user, "d");
    }

    #[test]
    fn test_prepend_is_exactly_batch_then_prior() {
        let mut board = TransactionBoard::new();
        board.apply_snapshot(vec![tx("older1", 1), tx("older2", 2), tx("older3", 3)]);
        board.prepend_batch(vec![tx("new1", 10), tx("new2", 20)]);

        let users: Vec<&str> = board.transactions().iter().map(|t| t.user.as_str()).collect();
        assert_eq!(users, vec!["new1", "new2", "older1", "older2", "older3"]);
    }

    #[test]
    fn test_prepend_keeps_duplicates() {
        let mut board = TransactionBoard::new();
        board.apply_snapshot(vec![tx("a", 1)]);
        board.prepend_batch(vec![tx("a", 1)]);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let board = TransactionBoard::new();
        let summary = board.summary();
        assert_eq!(summary.total_amount, Decimal::ZERO);
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn test_summary_sums_unfiltered_list() {
        let mut board = TransactionBoard::new();
        board.apply_snapshot(vec![tx("a", 100), tx("b", 250), tx("c", -50)]);
        let summary = board.summary();
        assert_eq!(summary.total_amount, Decimal::from(300));
        assert_eq!(summary.count, 3);
    }
}
