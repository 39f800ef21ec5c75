//! Wire event definitions for the transaction feed
//!
//! The feed delivers three event kinds: a connection acknowledgement, one
//! full snapshot per session, and incremental batches of new records. The
//! enum tags match the wire names exactly.

use flowdash_core::Transaction;
use serde::{Deserialize, Serialize};

/// An inbound event on the feed channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum FeedEvent {
    /// Connection established. Reserved; causes no state change.
    #[serde(rename = "connect")]
    Connected,

    /// Full snapshot: replaces the canonical list wholesale
    #[serde(rename = "transactions")]
    Snapshot(Vec<Transaction>),

    /// Incremental batch: prepended to the front of the canonical list
    #[serde(rename = "new-transactions")]
    Batch(Vec<Transaction>),
}

impl FeedEvent {
    /// Event kind as a string label for logging
    pub fn label(&self) -> &'static str {
        match self {
            FeedEvent::Connected => "connect",
            FeedEvent::Snapshot(_) => "transactions",
            FeedEvent::Batch(_) => "new-transactions",
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use flowdash_core::TransactionStatus;

    #[test]
    fn test_decode_connect_frame() {
        let event: FeedEvent = serde_json::from_str(r#"{"event":"connect"}"#).unwrap();
        assert_eq!(event, FeedEvent::Connected);
    }

    #[test]
    fn test_decode_snapshot_frame() {
        let frame = r#"{
            "event": "transactions",
            "data": [
                {"amount": "100.00", "currency": "NGN", "date": "2026-08-01T10:00:00Z", "status": "completed", "user": "John"},
                {"amount": "-25.50", "currency": "NGN", "date": "2026-08-01T11:00:00Z", "status": "pending", "user": "Mary"}
            ]
        }"#;
        let event: FeedEvent = serde_json::from_str(frame).unwrap();
        match event {
            FeedEvent::Snapshot(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].user, "John");
                assert_eq!(records[1].status, TransactionStatus::Pending);
            }
            other => panic!("expected snapshot, got {}", other.label()),
        }
    }

    #[test]
    fn test_decode_batch_frame() {
        let frame = r#"{
            "event": "new-transactions",
            "data": [
                {"amount": "7.25", "currency": "NGN", "date": "2026-08-02T09:00:00Z", "status": "refunded", "user": "Ada"}
            ]
        }"#;
        let event: FeedEvent = serde_json::from_str(frame).unwrap();
        match event {
            FeedEvent::Batch(records) => assert_eq!(records.len(), 1),
            other => panic!("expected batch, got {}", other.label()),
        }
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let result = serde_json::from_str::<FeedEvent>(r#"{"event":"heartbeat"}"#);
        assert!(result.is_err());
    }
}
