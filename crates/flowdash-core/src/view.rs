//! Derived view state: filtering, sorting, and projection
//!
//! A pure function from (canonical list, filter set, sort spec) to the
//! table rows plus aggregates. Recomputation is total and synchronous on
//! every input change; at UI scale (hundreds to low thousands of rows)
//! there is nothing to cache.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::board::BoardSummary;
use crate::models::{Transaction, TransactionStatus};

// ==================== Filters ====================

/// Columns that accept a filter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterColumn {
    /// Substring match on the user display name (case-sensitive)
    User,
    /// Exact match on the parsed status
    Status,
}

/// One active column filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub column: FilterColumn,
    pub value: String,
}

/// The set of active column filters. Keys are unique; absence of a column
/// means "no filter on that column". Every edit rebuilds the set
/// (remove-then-append), it is never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    filters: Vec<ColumnFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the filter on `column`. An empty value removes the filter.
    pub fn set(&mut self, column: FilterColumn, value: &str) {
        let mut next: Vec<ColumnFilter> = self
            .filters
            .iter()
            .filter(|f| f.column != column)
            .cloned()
            .collect();
        if !value.is_empty() {
            next.push(ColumnFilter {
                column,
                value: value.to_string(),
            });
        }
        self.filters = next;
    }

    /// The active value for `column`, if any
    pub fn get(&self, column: FilterColumn) -> Option<&str> {
        self.filters
            .iter()
            .find(|f| f.column == column)
            .map(|f| f.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Whether a record satisfies all active filters
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.filters.iter().all(|f| match f.column {
            FilterColumn::User => tx.user.contains(&f.value),
            FilterColumn::Status => {
                // The control value ("Completed") parses case-insensitively
                // into the enum and must match the record exactly.
                let wanted: TransactionStatus = f.value.parse().unwrap_or_default();
                tx.status == wanted
            }
        })
    }
}

// ==================== Sorting ====================

/// Sortable table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    User,
    Amount,
    Currency,
    Date,
    Status,
}

impl std::str::FromStr for SortColumn {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(SortColumn::User),
            "amount" => Ok(SortColumn::Amount),
            "currency" => Ok(SortColumn::Currency),
            "date" => Ok(SortColumn::Date),
            "status" => Ok(SortColumn::Status),
            _ => Err(format!("Invalid sort column: {}", s)),
        }
    }
}

impl std::fmt::Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortColumn::User => write!(f, "user"),
            SortColumn::Amount => write!(f, "amount"),
            SortColumn::Currency => write!(f, "currency"),
            SortColumn::Date => write!(f, "date"),
            SortColumn::Status => write!(f, "status"),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl std::str::FromStr for SortDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

/// The single active (column, direction) pair, derived from header clicks.
/// Not persisted across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Header-click cycle: unsorted -> ascending -> descending -> unsorted.
    /// Clicking a different column starts its cycle from ascending.
    pub fn toggled(current: Option<SortSpec>, column: SortColumn) -> Option<SortSpec> {
        match current {
            Some(spec) if spec.column == column => match spec.direction {
                SortDirection::Ascending => Some(SortSpec {
                    column,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec {
                column,
                direction: SortDirection::Ascending,
            }),
        }
    }
}

fn compare_column(a: &Transaction, b: &Transaction, column: SortColumn) -> Ordering {
    match column {
        SortColumn::User => a.user.cmp(&b.user),
        SortColumn::Amount => a.amount.cmp(&b.amount),
        SortColumn::Currency => a.currency.cmp(&b.currency),
        SortColumn::Date => a.date.cmp(&b.date),
        SortColumn::Status => a.status.to_string().cmp(&b.status.to_string()),
    }
}

// ==================== Projection ====================

/// A computed table view: filtered, sorted rows plus unfiltered aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableView {
    /// Rows satisfying every active filter, in display order
    pub rows: Vec<Transaction>,
    /// Aggregates over the whole canonical list, ignoring filters
    pub summary: BoardSummary,
}

/// Project the canonical list through the active filters and sort spec.
///
/// The filtered subsequence keeps the canonical order when no sort is
/// active; sorting is stable, so records comparing equal keep their
/// relative order. The summary always covers the unfiltered list.
pub fn project(list: &[Transaction], filters: &FilterSet, sort: Option<SortSpec>) -> TableView {
    let mut rows: Vec<Transaction> = list.iter().filter(|tx| filters.matches(tx)).cloned().collect();

    if let Some(spec) = sort {
        rows.sort_by(|a, b| {
            let ord = compare_column(a, b, spec.column);
            match spec.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }

    let total_amount = list.iter().map(|tx| tx.amount).sum();
    TableView {
        rows,
        summary: BoardSummary {
            total_amount,
            count: list.len(),
        },
    }
}

// ==================== Tests ====================
