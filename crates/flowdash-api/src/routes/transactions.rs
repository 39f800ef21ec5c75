//! Transactions endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Filtered, sorted view of the board (JSON)
//! - api_summary: Unfiltered aggregates (JSON)
//! - htmx_transactions_list: Transaction table (HTML fragment)
//!
//! Filter and sort state travels in query parameters (`user`, `status`,
//! `sort`, `dir`), so the fragment is a pure function of the board plus
//! the URL.

use crate::AppState;
use axum::extract::Query;
use axum::response::Html;
use flowdash_core::{project, FilterColumn, FilterSet, SortColumn, SortSpec};
use flowdash_utils::format_amount;
use std::collections::HashMap;

/// Translate query parameters into the view controls
pub fn view_query(params: &HashMap<String, String>) -> (FilterSet, Option<SortSpec>) {
    let mut filters = FilterSet::new();
    if let Some(user) = params.get("user") {
        filters.set(FilterColumn::User, user);
    }
    match params.get("status").map(|s| s.as_str()) {
        Some("all") | Some("") | None => {}
        Some(status) => filters.set(FilterColumn::Status, status),
    }

    let sort = params
        .get("sort")
        .and_then(|s| s.parse::<SortColumn>().ok())
        .map(|column| {
            let direction = params
                .get("dir")
                .and_then(|d| d.parse().ok())
                .unwrap_or(flowdash_core::SortDirection::Ascending);
            SortSpec { column, direction }
        });

    (filters, sort)
}

/// Get the projected transaction view (JSON API)
pub async fn api_transactions(
    state: axum::extract::State<AppState>,
    _session: crate::session::ApiSessionUser,
    params: Query<HashMap<String, String>>,
) -> String {
    let (filters, sort) = view_query(&params);
    let board = state.board.read().await;
    let view = project(board.transactions(), &filters, sort);
    serde_json::to_string(&view).unwrap_or_default()
}

/// Get board summary: total amount and record count (JSON API)
pub async fn api_summary(
    state: axum::extract::State<AppState>,
    _session: crate::session::ApiSessionUser,
) -> String {
    let board = state.board.read().await;
    let summary = board.summary();
    serde_json::to_string(&summary).unwrap_or_default()
}

/// Header cell for the table: clicking cycles the sort on that column.
/// Filter values are user input and must be percent-encoded before they
/// re-enter a URL inside a quoted attribute.
fn header_cell(label: &str, column: SortColumn, current: Option<SortSpec>, params: &HashMap<String, String>) -> String {
    let next = SortSpec::toggled(current, column);
    let user = params.get("user").map(|s| s.as_str()).unwrap_or("");
    let status = params.get("status").map(|s| s.as_str()).unwrap_or("all");

    let mut url = format!(
        "/transactions/list?user={}&status={}",
        urlencoding::encode(user),
        urlencoding::encode(status)
    );
    if let Some(spec) = next {
        url.push_str(&format!("&sort={}&dir={}", spec.column, spec.direction));
    }

    let marker = match current {
        Some(spec) if spec.column == column => match spec.direction {
            flowdash_core::SortDirection::Ascending => " ▲",
            flowdash_core::SortDirection::Descending => " ▼",
        },
        _ => "",
    };

    format!(
        r#"<th class='px-4 py-2 text-left text-sm font-medium text-gray-500 cursor-pointer hover:text-gray-900'
            hx-get='{}' hx-target='#transactions-content' hx-swap='innerHTML'>{}{}</th>"#,
        url, label, marker
    )
}

/// HTMX: Transaction table - Partial page update
///
/// Renders the loading spinner while the board is loading, otherwise the
/// filtered and sorted rows. The dashboard page polls this fragment to
/// stay live.
pub async fn htmx_transactions_list(
    state: axum::extract::State<AppState>,
    _session: crate::session::SessionUser,
    params: Query<HashMap<String, String>>,
) -> Html<String> {
    let (filters, sort) = view_query(&params);
    let board = state.board.read().await;

    if board.is_loading() {
        return Html(
            r#"<div class='flex items-center justify-center py-16'>
                <div class='animate-spin rounded-full h-10 w-10 border-b-2 border-indigo-600'></div>
                <span class='ml-3 text-gray-500'>Loading transactions...</span>
            </div>"#
                .to_string(),
        );
    }

    let view = project(board.transactions(), &filters, sort);
    let decimal_places = state.config.currency.decimal_places;

    let mut html = String::from("<table class='min-w-full bg-white rounded-lg shadow-sm'><thead><tr>");
    html.push_str(&header_cell("User", SortColumn::User, sort, &params));
    html.push_str(&header_cell("Amount", SortColumn::Amount, sort, &params));
    html.push_str(&header_cell("Currency", SortColumn::Currency, sort, &params));
    html.push_str(&header_cell("Date", SortColumn::Date, sort, &params));
    html.push_str(&header_cell("Status", SortColumn::Status, sort, &params));
    html.push_str("</tr></thead><tbody>");

    if view.rows.is_empty() {
        html.push_str(
            r#"<tr><td colspan='5' class='px-4 py-12 text-center text-gray-500'>No transactions found</td></tr>"#,
        );
    }

    for tx in &view.rows {
        let status_class = match tx.status {
            flowdash_core::TransactionStatus::Completed => "bg-green-100 text-green-700",
            flowdash_core::TransactionStatus::Pending => "bg-yellow-100 text-yellow-700",
            flowdash_core::TransactionStatus::Failed => "bg-red-100 text-red-700",
            flowdash_core::TransactionStatus::Refunded => "bg-blue-100 text-blue-700",
            flowdash_core::TransactionStatus::Other => "bg-gray-100 text-gray-600",
        };
        html.push_str(&format!(
            r#"<tr class='border-t hover:bg-gray-50'>
                <td class='px-4 py-2'>{}</td>
                <td class='px-4 py-2 font-medium'>{}</td>
                <td class='px-4 py-2 text-gray-500'>{}</td>
                <td class='px-4 py-2 text-gray-500'>{}</td>
                <td class='px-4 py-2'><span class='px-2 py-0.5 rounded-full text-xs font-medium {}'>{}</span></td>
            </tr>"#,
            tx.user,
            format_amount(tx.amount, decimal_places),
            tx.currency,
            tx.date_display(),
            status_class,
            tx.status
        ));
    }

    html.push_str("</tbody></table>");

    // The active sort rides back to the server in hidden inputs; the
    // dashboard's hx-include picks them up on polls and filter edits.
    if let Some(spec) = sort {
        html.push_str(&format!(
            r#"<input type='hidden' id='sort-col' name='sort' value='{}'>
            <input type='hidden' id='sort-dir' name='dir' value='{}'>"#,
            spec.column, spec.direction
        ));
    }

    html.push_str(&format!(
        r#"<div class='mt-3 text-sm text-gray-500'>{} of {} transactions shown</div>"#,
        view.rows.len(),
        view.summary.count
    ));

    Html(html)
}

// ==================== Tests ====================
