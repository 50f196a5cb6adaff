//! # REST API for Login
//!
//! `POST /api/login` is the only unauthenticated API route. A successful
//! login answers with the session cookie set.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tracing::info;

use super::error::ApiError;
use crate::backend::io::session::{clear_session_cookie, session_cookie, session_token};
use crate::backend::AppState;
use shared::{LoginRequest, LoginResponse};

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    info!("POST /api/login");

    if request.password.is_empty() {
        return Err(ApiError::bad_request("Password cannot be empty"));
    }

    let result = state.auth_service.login(&request.password).await;
    let response = LoginResponse {
        success: result.is_success(),
        message: result.message,
    };

    match result.session_token {
        Some(token) => Ok((
            [(header::SET_COOKIE, session_cookie(&token))],
            Json(response),
        )
            .into_response()),
        None => Ok((StatusCode::UNAUTHORIZED, Json(response)).into_response()),
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("POST /api/logout");

    if let Some(token) = session_token(&headers) {
        state.auth_service.logout(&token).await;
    }
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, clear_session_cookie())],
    )
}
