//! # REST API for the Dashboard
//!
//! Summary figures, monthly totals, the category list and AI advice.

use axum::{extract::State, response::Json};
use chrono::Local;
use tracing::{error, info};

use super::error::ApiError;
use super::mappers::SummaryMapper;
use crate::backend::domain::models::category_names;
use crate::backend::domain::ADVICE_DISCLAIMER;
use crate::backend::AppState;
use shared::{AdviceResponse, CategoryListResponse, DashboardSummary, MonthlyTotalsResponse};

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>, ApiError> {
    info!("GET /api/summary");

    let dashboard = state
        .summary_service
        .dashboard(Local::now().date_naive())
        .await
        .map_err(|e| {
            error!("Failed to build summary: {:#}", e);
            ApiError::from(e)
        })?;
    Ok(Json(SummaryMapper::to_dashboard_dto(dashboard)))
}

pub async fn get_monthly_totals(
    State(state): State<AppState>,
) -> Result<Json<MonthlyTotalsResponse>, ApiError> {
    info!("GET /api/summary/monthly");

    let totals = state.summary_service.monthly_totals().await.map_err(|e| {
        error!("Failed to build monthly totals: {:#}", e);
        ApiError::from(e)
    })?;
    Ok(Json(SummaryMapper::to_monthly_dto(totals)))
}

pub async fn list_categories() -> Json<CategoryListResponse> {
    info!("GET /api/categories");
    Json(CategoryListResponse {
        categories: category_names(),
    })
}

pub async fn get_advice(State(state): State<AppState>) -> Result<Json<AdviceResponse>, ApiError> {
    info!("POST /api/advice");

    let dashboard = state
        .summary_service
        .dashboard(Local::now().date_naive())
        .await
        .map_err(ApiError::from)?;
    let advice = state.advisor_service.advise(&dashboard).await.map_err(|e| {
        error!("Advice request failed: {:#}", e);
        ApiError::from(e)
    })?;

    Ok(Json(AdviceResponse {
        advice,
        disclaimer: ADVICE_DISCLAIMER.to_string(),
    }))
}
