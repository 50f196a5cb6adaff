//! # REST API for Assets and the Monthly Budget

use axum::{extract::State, response::Json};
use tracing::{error, info};

use super::error::ApiError;
use super::mappers::AssetMapper;
use crate::backend::AppState;
use shared::{
    AdjustAssetRequest, AdjustAssetResponse, AssetListResponse, BudgetResponse,
    ReplaceAssetsRequest, SetBudgetRequest,
};

pub async fn list_assets(State(state): State<AppState>) -> Result<Json<AssetListResponse>, ApiError> {
    info!("GET /api/assets");

    let assets = state.asset_service.list_assets().await.map_err(|e| {
        error!("Failed to load assets: {:#}", e);
        ApiError::from(e)
    })?;
    Ok(Json(AssetMapper::to_list_dto(assets)))
}

pub async fn replace_assets(
    State(state): State<AppState>,
    Json(request): Json<ReplaceAssetsRequest>,
) -> Result<Json<AssetListResponse>, ApiError> {
    info!("PUT /api/assets - request: {:?}", request);

    let assets = request.assets.into_iter().map(AssetMapper::to_domain).collect();
    let saved = state.asset_service.replace_assets(assets).await.map_err(|e| {
        error!("Failed to save assets: {:#}", e);
        ApiError::from(e)
    })?;
    Ok(Json(AssetMapper::to_list_dto(saved)))
}

pub async fn adjust_asset(
    State(state): State<AppState>,
    Json(request): Json<AdjustAssetRequest>,
) -> Result<Json<AdjustAssetResponse>, ApiError> {
    info!("POST /api/assets/adjust - request: {:?}", request);

    let command = AssetMapper::to_adjust_command(request);
    let result = state.asset_service.update_asset(command).await.map_err(|e| {
        error!("Failed to adjust asset: {:#}", e);
        ApiError::from(e)
    })?;
    Ok(Json(AssetMapper::to_adjust_response(result)))
}

pub async fn get_budget(State(state): State<AppState>) -> Result<Json<BudgetResponse>, ApiError> {
    info!("GET /api/budget");

    let monthly_budget = state.budget_service.monthly_budget().await.map_err(|e| {
        error!("Failed to load budget: {:#}", e);
        ApiError::from(e)
    })?;
    Ok(Json(BudgetResponse { monthly_budget }))
}

pub async fn set_budget(
    State(state): State<AppState>,
    Json(request): Json<SetBudgetRequest>,
) -> Result<Json<BudgetResponse>, ApiError> {
    info!("PUT /api/budget - request: {:?}", request);

    let monthly_budget = state
        .budget_service
        .set_monthly_budget(request.monthly_budget)
        .await
        .map_err(|e| {
            error!("Failed to save budget: {:#}", e);
            ApiError::from(e)
        })?;
    Ok(Json(BudgetResponse { monthly_budget }))
}
