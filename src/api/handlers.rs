//! HTTP handlers
//!
//! Thin plumbing over the engine: parse, delegate, map errors. All domain
//! checks live in the engine, which does not trust this layer.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

use crate::transfer::error::TransferError;
use crate::transfer::types::TransferRequest;

use super::AppState;
use super::types::{
    AccountApiResponse, ApiResponse, BalanceApiResponse, TransactionApiResponse,
    TransferApiRequest, TransferApiResponse,
};

type ApiError = (StatusCode, Json<ApiResponse<()>>);

fn reject(err: &TransferError) -> ApiError {
    let status = StatusCode::from_u16(err.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiResponse::from_error(err)))
}

/// POST /api/v1/transfer
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransferApiRequest>,
) -> Result<Json<ApiResponse<TransferApiResponse>>, ApiError> {
    let amount = Decimal::from_str(req.amount.trim()).map_err(|_| {
        reject(&TransferError::InvalidRequest(format!(
            "Invalid amount: {}",
            req.amount
        )))
    })?;

    if req.idempotency_key.trim().is_empty() {
        return Err(reject(&TransferError::InvalidRequest(
            "Idempotency key must not be empty".to_string(),
        )));
    }

    let outcome = state
        .engine
        .transfer(TransferRequest::new(
            req.from_account_id,
            req.to_account_id,
            amount,
            req.idempotency_key,
        ))
        .await
        .map_err(|e| reject(&e))?;

    Ok(Json(ApiResponse::success(outcome.into())))
}

/// GET /api/v1/accounts/{id}
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<AccountApiResponse>>, ApiError> {
    let account = state.accounts.get_account(id).await.map_err(|e| reject(&e))?;
    Ok(Json(ApiResponse::success(account.into())))
}

/// GET /api/v1/accounts/{id}/balance
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BalanceApiResponse>>, ApiError> {
    let balance = state.accounts.get_balance(id).await.map_err(|e| reject(&e))?;
    Ok(Json(ApiResponse::success(BalanceApiResponse {
        account_id: id,
        balance,
    })))
}

/// GET /api/v1/accounts/{id}/transactions
pub async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<TransactionApiResponse>>>, ApiError> {
    let records = state
        .accounts
        .get_transactions(id)
        .await
        .map_err(|e| reject(&e))?;
    let records = records.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(records)))
}

/// GET /health
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    state
        .engine
        .store()
        .health_check()
        .await
        .map_err(|e| reject(&TransferError::Storage(e.to_string())))?;
    Ok(Json(ApiResponse::success("ok".to_string())))
}
