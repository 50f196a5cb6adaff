//! # REST API for Expenses
//!
//! Listing the history, manual entry, receipt scanning and replacing the
//! whole history with an edited table.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use super::error::ApiError;
use super::mappers::ExpenseMapper;
use crate::backend::io::upload::{read_receipt_upload, scan_and_record};
use crate::backend::AppState;
use shared::{
    ExpenseListResponse, ManualExpenseRequest, ReceiptScanResponse, RecordExpenseResponse,
    ReplaceExpensesRequest, ReplaceExpensesResponse,
};

pub async fn list_expenses(State(state): State<AppState>) -> Result<Json<ExpenseListResponse>, ApiError> {
    info!("GET /api/expenses");

    let expenses = state.expense_service.list_expenses().await.map_err(|e| {
        error!("Failed to list expenses: {:#}", e);
        ApiError::from(e)
    })?;
    Ok(Json(ExpenseMapper::to_list_dto(expenses)))
}

pub async fn record_manual_expense(
    State(state): State<AppState>,
    Json(request): Json<ManualExpenseRequest>,
) -> Result<(StatusCode, Json<RecordExpenseResponse>), ApiError> {
    info!("POST /api/expenses - request: {:?}", request);

    let command = ExpenseMapper::to_manual_command(request);
    let result = state.expense_service.record_manual_expense(command).await.map_err(|e| {
        error!("Failed to record expense: {:#}", e);
        ApiError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(ExpenseMapper::to_record_response(result))))
}

pub async fn replace_expenses(
    State(state): State<AppState>,
    Json(request): Json<ReplaceExpensesRequest>,
) -> Result<Json<ReplaceExpensesResponse>, ApiError> {
    info!("PUT /api/expenses - {} rows", request.expenses.len());

    let command = ExpenseMapper::to_replace_command(request);
    let result = state.expense_service.replace_history(command).await.map_err(|e| {
        error!("Failed to replace expense history: {:#}", e);
        ApiError::from(e)
    })?;

    Ok(Json(ExpenseMapper::to_replace_response(result)))
}

pub async fn scan_receipt(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ReceiptScanResponse>), ApiError> {
    info!("POST /api/expenses/scan");

    let upload = read_receipt_upload(multipart).await.map_err(ApiError::from)?;
    let result = scan_and_record(&state, upload).await.map_err(|e| {
        error!("Receipt scan failed: {:#}", e);
        ApiError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(ExpenseMapper::to_scan_response(result))))
}
