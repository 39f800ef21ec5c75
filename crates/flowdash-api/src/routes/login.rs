//! Login and logout - page and upstream proxy endpoints
//!
//! The dashboard never talks to the upstream auth service from the
//! browser; the login form posts here and the server relays the call.
//! On success the upstream's Set-Cookie headers (the session token) are
//! passed through unchanged, so the browser stores the cookie against
//! this origin.

use crate::{base_html, ApiError, AppState};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Shown when the upstream rejects the credentials without a message
pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed. Please try again.";
/// Shown when the upstream cannot be reached at all
pub const LOGIN_NETWORK_MESSAGE: &str = "An error occurred during login. Please try again.";
/// How long an error message stays on the login page before self-clearing
const ERROR_CLEAR_MS: u64 = 3000;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body shape of upstream error responses; only `message` matters here
#[derive(Debug, Deserialize)]
struct UpstreamError {
    message: Option<String>,
}

/// Proxy the login call to the upstream auth endpoint.
///
/// Success relays every Set-Cookie header from the upstream response.
/// Failure answers with the upstream's message when it has one, the
/// generic fallback otherwise.
pub async fn api_login(
    state: axum::extract::State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required.".to_string(),
        ));
    }

    let upstream = state
        .http_client
        .post(state.config.login_url())
        .json(&serde_json::json!({
            "email": request.email,
            "password": request.password,
        }))
        .send()
        .await
        .map_err(|e| {
            log::warn!("login proxy request failed: {}", e);
            ApiError::UpstreamUnavailable(LOGIN_NETWORK_MESSAGE.to_string())
        })?;

    if upstream.status().is_success() {
        let cookies: Vec<HeaderValue> = upstream
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| HeaderValue::from_bytes(value.as_bytes()).ok())
            .collect();

        let mut response = Json(LoginResponse {
            ok: true,
            message: None,
        })
        .into_response();
        for cookie in cookies {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
        return Ok(response);
    }

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::UNAUTHORIZED);
    let message = upstream
        .json::<UpstreamError>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| LOGIN_FALLBACK_MESSAGE.to_string());
    log::info!("login rejected by upstream: {}", status);

    Ok((
        status,
        Json(LoginResponse {
            ok: false,
            message: Some(message),
        }),
    )
        .into_response())
}

/// Proxy the logout call and expire the session cookie.
///
/// The caller's Cookie header travels with the upstream request so the
/// backend can identify which session to terminate.
pub async fn api_logout(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<Response, ApiError> {
    let mut request = state.http_client.post(state.config.logout_url());
    if let Some(cookie) = headers.get(header::COOKIE) {
        request = request.header(header::COOKIE, cookie.clone());
    }

    let upstream = request
        .send()
        .await
        .map_err(|e| {
            log::warn!("logout proxy request failed: {}", e);
            ApiError::UpstreamUnavailable("Logout failed. Please try again.".to_string())
        })?;

    if !upstream.status().is_success() {
        log::warn!("logout rejected by upstream: {}", upstream.status());
        return Err(ApiError::UpstreamUnavailable(
            "Logout failed. Please try again.".to_string(),
        ));
    }

    let expired = format!(
        "{}=; Path=/; HttpOnly; Max-Age=0",
        state.config.session.cookie_name
    );
    let mut response = Json(LoginResponse {
        ok: true,
        message: None,
    })
    .into_response();
    if let Ok(value) = HeaderValue::from_str(&expired) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    Ok(response)
}

/// Login page - standalone, no dashboard chrome
pub async fn page_login() -> Html<String> {
    let content = format!(
        r#"<div class='min-h-screen flex items-center justify-center'>
        <div class='bg-white rounded-xl shadow-sm p-8 w-full max-w-md'>
            <h1 class='text-2xl font-bold text-center mb-1'>Flowdash</h1>
            <p class='text-sm text-gray-500 text-center mb-6'>Sign in to view your transactions</p>
            <div id='login-error' class='hidden mb-4 p-3 rounded-lg bg-red-50 border border-red-200 text-sm text-red-600'></div>
            <form id='login-form' class='space-y-4'>
                <div>
                    <label class='block text-sm font-medium text-gray-700 mb-1' for='email'>Email</label>
                    <input type='email' id='email' name='email' required
                        class='w-full px-3 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500'>
                </div>
                <div>
                    <label class='block text-sm font-medium text-gray-700 mb-1' for='password'>Password</label>
                    <input type='password' id='password' name='password' required
                        class='w-full px-3 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500'>
                </div>
                <button type='submit' id='login-submit'
                    class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'>
                    Sign in
                </button>
            </form>
        </div>
    </div>
    <script>
    let errorTimer = null;

    function showError(message) {{
        const box = document.getElementById('login-error');
        box.textContent = message;
        box.classList.remove('hidden');
        if (errorTimer) clearTimeout(errorTimer);
        errorTimer = setTimeout(() => {{
            box.classList.add('hidden');
            box.textContent = '';
        }}, {clear_ms});
    }}

    document.getElementById('login-form').addEventListener('submit', function(e) {{
        e.preventDefault();
        const submit = document.getElementById('login-submit');
        submit.disabled = true;
        fetch('/api/v1/users/login', {{
            method: 'POST',
            headers: {{ 'Content-Type': 'application/json' }},
            body: JSON.stringify({{
                email: document.getElementById('email').value,
                password: document.getElementById('password').value
            }})
        }})
        .then(r => r.json().then(data => ({{ ok: r.ok, data }})))
        .then(({{ ok, data }}) => {{
            if (ok) {{
                window.location.href = '/dashboard';
            }} else {{
                showError(data.message || '{fallback}');
            }}
        }})
        .catch(() => showError('{network}'))
        .finally(() => {{ submit.disabled = false; }});
    }});
    </script>"#,
        clear_ms = ERROR_CLEAR_MS,
        fallback = LOGIN_FALLBACK_MESSAGE,
        network = LOGIN_NETWORK_MESSAGE
    );

    Html(base_html("Sign in", &content))
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::extract::State;
    use axum::http::HeaderMap;
    use axum::routing::post;
    use axum::Router;
    use flowdash_config::Config;
    use std::sync::{Arc, Mutex};

    fn test_state(base_url: &str) -> AppState {
        let mut config = Config::default();
        config.session.secret = "test-secret".to_string();
        config.upstream.base_url = base_url.to_string();
        AppState::new(flowdash_core::new_shared_board(), config)
    }

    /// Serve a stub upstream on an ephemeral port; returns its base URL
    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn login_request() -> Json<LoginRequest> {
        Json(LoginRequest {
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_api_login_relays_set_cookie_on_success() {
        let upstream = Router::new().route(
            "/api/v1/users/login",
            post(|| async {
                (
                    [(header::SET_COOKIE, "token=stub-session; Path=/")],
                    Json(serde_json::json!({"status": "ok"})),
                )
            }),
        );
        let base = spawn_upstream(upstream).await;

        let response = api_login(State(test_state(&base)), login_request())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cookie.contains("token=stub-session"));
    }

    #[tokio::test]
    async fn test_api_login_relays_upstream_message_on_failure() {
        let upstream = Router::new().route(
            "/api/v1/users/login",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({"message": "Invalid credentials"})),
                )
            }),
        );
        let base = spawn_upstream(upstream).await;

        let response = api_login(State(test_state(&base)), login_request())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_api_login_falls_back_when_upstream_has_no_message() {
        let upstream = Router::new().route(
            "/api/v1/users/login",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({"status": "error"})),
                )
            }),
        );
        let base = spawn_upstream(upstream).await;

        let response = api_login(State(test_state(&base)), login_request())
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["message"], LOGIN_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_api_login_network_failure_uses_generic_message() {
        // Bind then drop the listener so nothing answers on that port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = api_login(
            State(test_state(&format!("http://{}", addr))),
            login_request(),
        )
        .await;

        let response = match result {
            Err(e) => e.into_response(),
            Ok(_) => panic!("expected an upstream error"),
        };
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["message"], LOGIN_NETWORK_MESSAGE);
    }

    #[tokio::test]
    async fn test_api_logout_forwards_session_cookie_upstream() {
        let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let recorded = seen.clone();
        let upstream = Router::new().route(
            "/api/v1/users/logout",
            post(move |headers: HeaderMap| {
                let recorded = recorded.clone();
                async move {
                    *recorded.lock().unwrap() = headers
                        .get(header::COOKIE)
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    StatusCode::OK
                }
            }),
        );
        let base = spawn_upstream(upstream).await;

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("token=abc123"));
        let response = api_logout(State(test_state(&base)), headers)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let expired = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(expired.contains("Max-Age=0"));
        assert_eq!(seen.lock().unwrap().as_deref(), Some("token=abc123"));
    }

    #[test]
    fn test_login_response_omits_absent_message() {
        let ok = serde_json::to_string(&LoginResponse {
            ok: true,
            message: None,
        })
        .unwrap();
        assert_eq!(ok, r#"{"ok":true}"#);

        let failed = serde_json::to_string(&LoginResponse {
            ok: false,
            message: Some("Invalid credentials".to_string()),
        })
        .unwrap();
        assert!(failed.contains("Invalid credentials"));
    }

    #[test]
    fn test_upstream_error_body_parses_with_and_without_message() {
        let with: UpstreamError = serde_json::from_str(r#"{"message":"Invalid credentials"}"#).unwrap();
        assert_eq!(with.message.as_deref(), Some("Invalid credentials"));

        let without: UpstreamError = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        assert!(without.message.is_none());
    }

    #[test]
    fn test_login_page_carries_error_fallbacks() {
        // The page script must fall back to the exact shared messages
        let page = render_login_page();
        assert!(page.contains(LOGIN_FALLBACK_MESSAGE));
        assert!(page.contains(LOGIN_NETWORK_MESSAGE));
        assert!(page.contains("/api/v1/users/login"));
    }

    fn render_login_page() -> String {
        // page_login takes no request state, so a tiny runtime suffices
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(page_login())
            .0
    }
}
