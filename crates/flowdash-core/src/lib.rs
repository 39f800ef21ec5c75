//! Core transaction state and derived view logic
//!
//! This crate owns the session-lived, in-memory view over feed data:
//! the canonical transaction list (`TransactionBoard`), and the pure
//! projection from that list plus user controls to table rows and
//! aggregates (`view::project`).

pub mod board;
pub mod models;
pub mod view;

pub use board::{BoardSummary, TransactionBoard};
pub use models::{Transaction, TransactionStatus};
pub use view::{
    project, ColumnFilter, FilterColumn, FilterSet, SortColumn, SortDirection, SortSpec, TableView,
};

use std::sync::Arc;

/// Shared handle to the board used by the feed task and the HTTP handlers.
///
/// All mutation happens on the feed task with the write lock held at
/// mutation time; handlers only ever take the read lock.
pub type SharedBoard = Arc<tokio::sync::RwLock<TransactionBoard>>;

/// Create a fresh shared board for a dashboard session
pub fn new_shared_board() -> SharedBoard {
    Arc::new(tokio::sync::RwLock::new(TransactionBoard::new()))
}
