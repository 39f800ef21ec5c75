//! Dashboard page - the protected live transaction view
//!
//! The page itself is static chrome; the summary cards and the
//! transaction table are HTMX fragments that poll the server, so the
//! view tracks the feed without a page reload. Filter and sort state
//! rides along as query parameters via hx-include.

use crate::session::SessionUser;
use crate::{base_html, AppState};
use axum::response::Html;
use flowdash_utils::format_amount;

/// HTMX: Summary cards - aggregates over the whole board, ignoring filters
pub async fn htmx_summary_cards(
    state: axum::extract::State<AppState>,
    _session: SessionUser,
) -> Html<String> {
    Html(summary_cards(&state).await)
}

/// Render the summary card markup from the current board state
pub async fn summary_cards(state: &AppState) -> String {
    let board = state.board.read().await;
    let summary = board.summary();
    let balance = format_amount(summary.total_amount, state.config.currency.decimal_places);

    format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-2 gap-4'>
            <div class='bg-white p-5 rounded-xl shadow-sm border'>
                <p class='text-sm text-gray-500'>Total Balance</p>
                <p class='text-2xl font-bold text-indigo-600'>{} {}</p>
            </div>
            <div class='bg-white p-5 rounded-xl shadow-sm border'>
                <p class='text-sm text-gray-500'>Users</p>
                <p class='text-2xl font-bold'>{}</p>
            </div>
        </div>"#,
        state.config.currency.code, balance, summary.count
    )
}

/// Dashboard page. Requires a valid session; the extractor redirects to
/// the login page otherwise.
pub async fn page_dashboard(
    state: axum::extract::State<AppState>,
    _session: SessionUser,
) -> Html<String> {
    let initial_summary = summary_cards(&state).await;

    let content = format!(
        r#"<div class='max-w-5xl mx-auto p-6'>
        <div class='flex items-center justify-between mb-6'>
            <h1 class='text-2xl font-bold'>Dashboard</h1>
            <div class='flex items-center gap-4'>
                <span class='text-sm text-gray-600'>Admin User</span>
                <button onclick='logout()' class='px-3 py-1.5 text-sm border rounded-lg hover:bg-gray-50'>Logout</button>
            </div>
        </div>

        <div id='summary-cards' class='mb-6' hx-get='/dashboard/summary' hx-trigger='every 2s' hx-swap='innerHTML'>
            {summary}
        </div>

        <div class='flex items-center gap-3 mb-4'>
            <input type='text' id='filter-user' name='user' placeholder='Filter by user'
                class='px-3 py-2 border rounded-lg text-sm flex-1 max-w-xs'
                hx-get='/transactions/list' hx-target='#transactions-content'
                hx-trigger='keyup changed delay:300ms'
                hx-include='#filter-user, #filter-status, #sort-col, #sort-dir'>
            <select id='filter-status' name='status'
                class='px-3 py-2 border rounded-lg text-sm bg-white'
                hx-get='/transactions/list' hx-target='#transactions-content'
                hx-trigger='change'
                hx-include='#filter-user, #filter-status, #sort-col, #sort-dir'>
                <option value='all'>All statuses</option>
                <option value='Completed'>Completed</option>
                <option value='Pending'>Pending</option>
                <option value='Failed'>Failed</option>
                <option value='Refunded'>Refunded</option>
            </select>
        </div>

        <div id='transactions-content'
            hx-get='/transactions/list' hx-trigger='load, every 2s'
            hx-include='#filter-user, #filter-status, #sort-col, #sort-dir' hx-swap='innerHTML'>
        </div>
    </div>
    <script>
    function logout() {{
        fetch('/api/v1/users/logout', {{ method: 'POST' }})
            .then(() => {{ window.location.href = '/login'; }})
            .catch(err => console.error('Logout failed:', err));
    }}
    </script>"#,
        summary = initial_summary
    );

    Html(base_html("Dashboard", &content))
}
