//! Route modules for the API server
//!
//! - login: Login page plus upstream auth proxy (login/logout)
//! - dashboard: Protected dashboard page and summary fragment
//! - transactions: Transaction view endpoints (JSON and HTMX)

pub mod dashboard;
pub mod login;
pub mod transactions;
