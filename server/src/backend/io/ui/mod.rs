//! # Browser UI
//!
//! Server-rendered pages: a login form and a single dashboard that carries
//! the metrics, charts, entry forms and the history and settings editors.

pub mod charts;
pub mod forms;
pub mod handlers;
pub mod templates;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::io::session::require_page_session;
use crate::backend::io::upload::MAX_RECEIPT_BYTES;
use crate::backend::AppState;

/// Outcome shown after a successful form post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Recorded,
    Scanned,
    HistorySaved,
    AssetsSaved,
    BudgetSaved,
}

impl Notice {
    pub fn code(self) -> &'static str {
        match self {
            Notice::Recorded => "recorded",
            Notice::Scanned => "scanned",
            Notice::HistorySaved => "history_saved",
            Notice::AssetsSaved => "assets_saved",
            Notice::BudgetSaved => "budget_saved",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        [
            Notice::Recorded,
            Notice::Scanned,
            Notice::HistorySaved,
            Notice::AssetsSaved,
            Notice::BudgetSaved,
        ]
        .into_iter()
        .find(|n| n.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::Recorded => "記録しました",
            Notice::Scanned => "記録完了＆現金を更新しました",
            Notice::HistorySaved => "保存しました",
            Notice::AssetsSaved => "資産を保存しました",
            Notice::BudgetSaved => "予算を保存しました",
        }
    }
}

pub fn router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(handlers::dashboard))
        .route("/advice", post(handlers::advice))
        .route(
            "/expenses/scan",
            post(handlers::scan_receipt).layer(DefaultBodyLimit::max(MAX_RECEIPT_BYTES)),
        )
        .route("/expenses/manual", post(handlers::manual_expense))
        .route("/history", post(handlers::save_history))
        .route("/settings/assets", post(handlers::save_assets))
        .route("/settings/budget", post(handlers::save_budget))
        .route("/logout", post(handlers::logout))
        .route_layer(middleware::from_fn_with_state(state, require_page_session));

    Router::new()
        .route(
            "/login",
            get(handlers::login_page_handler).post(handlers::login_submit),
        )
        .merge(protected)
}
