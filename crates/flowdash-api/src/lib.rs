//! HTTP server for the live transaction dashboard
//!
//! Routes are organized into modules:
//! - routes::login: Login page and upstream auth proxy
//! - routes::dashboard: Protected dashboard page and summary fragment
//! - routes::transactions: Transaction view (JSON API and HTMX fragments)

pub mod error;
pub mod routes;
pub mod session;

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use flowdash_config::Config;
use flowdash_core::SharedBoard;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;
pub use session::{ApiSessionUser, Claims, SessionUser};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub board: SharedBoard,
    pub config: Config,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(board: SharedBoard, config: Config) -> Self {
        Self {
            board,
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::{htmx_summary_cards, page_dashboard};
    use routes::login::{api_login, api_logout, page_login};
    use routes::transactions::{api_summary, api_transactions, htmx_transactions_list};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/summary", get(api_summary))
        .route("/api/v1/users/login", post(api_login))
        .route("/api/v1/users/logout", post(api_logout))
        // Pages
        .route("/", get(index_page))
        .route("/login", get(page_login))
        .route("/dashboard", get(page_dashboard))
        // HTMX partial routes
        .route("/dashboard/summary", get(htmx_summary_cards))
        .route("/transactions/list", get(htmx_transactions_list))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Index: the dashboard is the only destination; the session gate on it
/// bounces unauthenticated visitors to the login page.
async fn index_page() -> Redirect {
    Redirect::temporary("/dashboard")
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Flowdash</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Start the HTTP server
///
/// Creates the router, binds to the configured address, and serves until
/// shutdown.
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    eprintln!("[INFO] Starting Flowdash server on http://{}", addr);
    eprintln!("[INFO] Available routes:");
    eprintln!("[INFO]   - /login (Sign in)");
    eprintln!("[INFO]   - /dashboard (Live transactions)");
    eprintln!("[INFO]   - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    eprintln!("[INFO] Server stopped gracefully");
    Ok(())
}
