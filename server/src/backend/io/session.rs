//! Session cookie and the middleware that guards authenticated routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::backend::io::rest::error::ApiError;
use crate::backend::AppState;

pub const SESSION_COOKIE: &str = "finance_os_session";

/// Pull the session token out of the `Cookie` header
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
        .filter(|token| !token.is_empty())
}

pub fn session_cookie(token: &str) -> String {
    format!("{}={}; HttpOnly; SameSite=Strict; Path=/", SESSION_COOKIE, token)
}

pub fn clear_session_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0", SESSION_COOKIE)
}

async fn has_valid_session(state: &AppState, headers: &HeaderMap) -> bool {
    match session_token(headers) {
        Some(token) => state.auth_service.is_authenticated(&token).await,
        None => false,
    }
}

/// Guard for HTML pages: no session sends the browser to the login page.
pub async fn require_page_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if has_valid_session(&state, request.headers()).await {
        return next.run(request).await;
    }
    debug!("No session for {}, redirecting to login", request.uri().path());
    Redirect::to("/login").into_response()
}

/// Guard for the JSON API: no session is a 401.
pub async fn require_api_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if has_valid_session(&state, request.headers()).await {
        return next.run(request).await;
    }
    debug!("Rejecting unauthenticated API call to {}", request.uri().path());
    ApiError::Unauthorized.into_response()
}
