//! HTML page and form handlers.
//!
//! Successful form posts redirect back to the dashboard with a notice code.
//! Failures re-render the dashboard with an error banner.

use anyhow::Result;
use axum::{
    extract::{Multipart, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Local;
use tracing::{error, info};

use super::charts::{category_donut, monthly_bars, BAR_MONTHS};
use super::forms::{
    parse_asset_form, parse_form_amount, parse_history_form, BudgetForm, DashboardQuery, LoginForm,
    ManualExpenseForm,
};
use super::templates::{dashboard_page, login_page, DashboardView};
use super::Notice;
use crate::backend::domain::commands::expenses::{ManualExpenseCommand, ReplaceHistoryCommand};
use crate::backend::domain::models::CATEGORIES;
use crate::backend::io::rest::error::ApiError;
use crate::backend::io::session::{clear_session_cookie, session_cookie, session_token};
use crate::backend::io::upload::{read_receipt_upload, scan_and_record};
use crate::backend::AppState;

/// Messages shown on top of the dashboard
#[derive(Default)]
struct PageMessages {
    notice: Option<String>,
    error: Option<String>,
    advice: Option<String>,
}

async fn render_dashboard(state: &AppState, messages: PageMessages) -> Result<String> {
    let today = Local::now().date_naive();
    let dashboard = state.summary_service.dashboard(today).await?;
    let history = state.expense_service.list_expenses().await?;
    let monthly = state.summary_service.monthly_totals().await?;

    let donut_svg = category_donut(&dashboard.category_totals)?;
    let monthly_svg = monthly_bars(&monthly)?;
    let monthly_labels = monthly
        .iter()
        .skip(monthly.len().saturating_sub(BAR_MONTHS))
        .map(|m| format!("{}: {}", m, shared::format_yen(m.total)))
        .collect();

    Ok(dashboard_page(&DashboardView {
        dashboard: &dashboard,
        history: &history,
        categories: &CATEGORIES,
        today,
        donut_svg,
        monthly_svg,
        monthly_labels,
        notice: messages.notice,
        error: messages.error,
        advice: messages.advice,
        ai_enabled: state.advisor_service.is_configured(),
    }))
}

async fn page(state: &AppState, status: StatusCode, messages: PageMessages) -> Response {
    match render_dashboard(state, messages).await {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Failed to render dashboard: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>データの読み込みに失敗しました</h1>".to_string()),
            )
                .into_response()
        }
    }
}

/// Re-render the dashboard with the failure shown as a banner.
async fn action_failed(state: &AppState, context: &str, err: anyhow::Error) -> Response {
    error!("{} failed: {:#}", context, err);
    let api_error = ApiError::from(err);
    let messages = PageMessages {
        error: Some(format!("エラー: {}", api_error.message())),
        ..Default::default()
    };
    page(state, api_error.status_code(), messages).await
}

fn redirect_with(notice: Notice) -> Response {
    Redirect::to(&format!("/?notice={}", notice.code())).into_response()
}

pub async fn login_page_handler() -> Html<String> {
    Html(login_page(None))
}

pub async fn login_submit(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    info!("POST /login");

    let result = state.auth_service.login(&form.password).await;
    match result.session_token {
        Some(token) => (
            [(header::SET_COOKIE, session_cookie(&token))],
            Redirect::to("/"),
        )
            .into_response(),
        None => (StatusCode::UNAUTHORIZED, Html(login_page(Some(&result.message)))).into_response(),
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    info!("POST /logout");

    if let Some(token) = session_token(&headers) {
        state.auth_service.logout(&token).await;
    }
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}

pub async fn dashboard(State(state): State<AppState>, Query(query): Query<DashboardQuery>) -> Response {
    info!("GET /");

    let notice = query
        .notice
        .as_deref()
        .and_then(Notice::from_code)
        .map(|n| n.message().to_string());
    page(&state, StatusCode::OK, PageMessages { notice, ..Default::default() }).await
}

pub async fn advice(State(state): State<AppState>) -> Response {
    info!("POST /advice");

    let today = Local::now().date_naive();
    let outcome = match state.summary_service.dashboard(today).await {
        Ok(dashboard) => state.advisor_service.advise(&dashboard).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(advice) => {
            let messages = PageMessages {
                advice: Some(advice),
                ..Default::default()
            };
            page(&state, StatusCode::OK, messages).await
        }
        Err(e) => {
            error!("Advice request failed: {:#}", e);
            let api_error = ApiError::from(e);
            let messages = PageMessages {
                error: Some(format!("診断に失敗しました: {}", api_error.message())),
                ..Default::default()
            };
            page(&state, api_error.status_code(), messages).await
        }
    }
}

pub async fn scan_receipt(State(state): State<AppState>, multipart: Multipart) -> Response {
    info!("POST /expenses/scan");

    let outcome = match read_receipt_upload(multipart).await {
        Ok(upload) => scan_and_record(&state, upload).await,
        Err(e) => Err(e),
    };
    match outcome {
        Ok(_) => redirect_with(Notice::Scanned),
        Err(e) => action_failed(&state, "Receipt scan", e).await,
    }
}

pub async fn manual_expense(State(state): State<AppState>, Form(form): Form<ManualExpenseForm>) -> Response {
    info!("POST /expenses/manual - form: {:?}", form);

    let price = match parse_form_amount(&form.price) {
        Ok(price) => price,
        Err(e) => return action_failed(&state, "Manual entry", e.into()).await,
    };
    let command = ManualExpenseCommand {
        date: form.date.filter(|d| !d.trim().is_empty()),
        price,
        category: form.category,
        store: form.store,
    };

    match state.expense_service.record_manual_expense(command).await {
        Ok(_) => redirect_with(Notice::Recorded),
        Err(e) => action_failed(&state, "Manual entry", e).await,
    }
}

pub async fn save_history(State(state): State<AppState>, Form(fields): Form<Vec<(String, String)>>) -> Response {
    info!("POST /history - {} fields", fields.len());

    let expenses = match parse_history_form(fields) {
        Ok(expenses) => expenses,
        Err(e) => return action_failed(&state, "History edit", e.into()).await,
    };

    match state
        .expense_service
        .replace_history(ReplaceHistoryCommand { expenses })
        .await
    {
        Ok(_) => redirect_with(Notice::HistorySaved),
        Err(e) => action_failed(&state, "History edit", e).await,
    }
}

pub async fn save_assets(State(state): State<AppState>, Form(fields): Form<Vec<(String, String)>>) -> Response {
    info!("POST /settings/assets - {} fields", fields.len());

    let assets = match parse_asset_form(fields) {
        Ok(assets) => assets,
        Err(e) => return action_failed(&state, "Asset settings", e.into()).await,
    };

    match state.asset_service.replace_assets(assets).await {
        Ok(_) => redirect_with(Notice::AssetsSaved),
        Err(e) => action_failed(&state, "Asset settings", e).await,
    }
}

pub async fn save_budget(State(state): State<AppState>, Form(form): Form<BudgetForm>) -> Response {
    info!("POST /settings/budget - form: {:?}", form);

    let amount = match parse_form_amount(&form.monthly_budget) {
        Ok(amount) => amount,
        Err(e) => return action_failed(&state, "Budget settings", e.into()).await,
    };

    match state.budget_service.set_monthly_budget(amount).await {
        Ok(_) => redirect_with(Notice::BudgetSaved),
        Err(e) => action_failed(&state, "Budget settings", e).await,
    }
}
