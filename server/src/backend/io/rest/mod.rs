//! # REST API Interface Layer
//!
//! JSON endpoints under `/api`. Handlers translate between the DTOs in the
//! `shared` crate and domain commands, log each call, and turn failures into
//! [`ApiError`](error::ApiError) responses.
//!
//! Every route except `POST /api/login` requires the session cookie.

pub mod asset_apis;
pub mod auth_apis;
pub mod error;
pub mod expense_apis;
pub mod mappers;
pub mod summary_apis;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::io::session::require_api_session;
use crate::backend::io::upload::MAX_RECEIPT_BYTES;
use crate::backend::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", post(auth_apis::logout))
        .route("/summary", get(summary_apis::get_summary))
        .route("/summary/monthly", get(summary_apis::get_monthly_totals))
        .route("/categories", get(summary_apis::list_categories))
        .route("/advice", post(summary_apis::get_advice))
        .route(
            "/expenses",
            get(expense_apis::list_expenses)
                .post(expense_apis::record_manual_expense)
                .put(expense_apis::replace_expenses),
        )
        .route(
            "/expenses/scan",
            post(expense_apis::scan_receipt).layer(DefaultBodyLimit::max(MAX_RECEIPT_BYTES)),
        )
        .route(
            "/assets",
            get(asset_apis::list_assets).put(asset_apis::replace_assets),
        )
        .route("/assets/adjust", post(asset_apis::adjust_asset))
        .route(
            "/budget",
            get(asset_apis::get_budget).put(asset_apis::set_budget),
        )
        .route_layer(middleware::from_fn_with_state(state, require_api_session));

    Router::new()
        .route("/login", post(auth_apis::login))
        .merge(protected)
}
