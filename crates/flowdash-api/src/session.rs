//! Session gate for protected pages
//!
//! The upstream issues a JWT and sets it as the session cookie at login.
//! Protected pages extract [`SessionUser`] from the request; a missing or
//! invalid token rejects with a redirect to the login page rather than an
//! error body.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState};

/// Claims carried by the upstream session token. Extra claims are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's identifier
    pub sub: String,
    /// Expiry, seconds since the epoch
    pub exp: usize,
}

/// An authenticated session, proven by a valid token cookie
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub claims: Claims,
}

/// Rejection for unauthenticated requests: bounce to the login page
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::temporary("/login").into_response()
    }
}

/// Pull a single cookie value out of the Cookie header
fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    let raw = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Verify a session token against the shared secret
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookie_name = &state.config.session.cookie_name;
        let token = cookie_value(parts, cookie_name).ok_or(AuthRedirect)?;

        match verify_token(&token, &state.config.session.secret) {
            Ok(claims) => Ok(SessionUser { claims }),
            Err(e) => {
                log::debug!("session token rejected: {}", e);
                Err(AuthRedirect)
            }
        }
    }
}

/// An authenticated session for JSON data endpoints. Same verification as
/// [`SessionUser`], but rejects with a 401 error body instead of a page
/// redirect.
#[derive(Debug, Clone)]
pub struct ApiSessionUser {
    pub claims: Claims,
}

#[async_trait]
impl FromRequestParts<AppState> for ApiSessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookie_name = &state.config.session.cookie_name;
        let token = cookie_value(parts, cookie_name)
            .ok_or_else(|| ApiError::Unauthorized("Missing session token".to_string()))?;

        let claims = verify_token(&token, &state.config.session.secret).map_err(|e| {
            log::debug!("session token rejected: {}", e);
            ApiError::Unauthorized("Invalid session token".to_string())
        })?;
        Ok(ApiSessionUser { claims })
    }
}

// ==================== Tests ====================
