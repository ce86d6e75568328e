//! API request/response types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::transfer::error::TransferError;
use crate::transfer::types::{TransactionId, TransferOutcome, TransferRecord};

/// Uniform response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// "OK" on success, a stable error code otherwise
    pub code: String,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: "OK".to_string(),
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: impl Into<String>, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code: code.into(),
            msg: msg.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn from_error(err: &TransferError) -> ApiResponse<()> {
        ApiResponse::<()>::error(err.code(), err.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct TransferApiRequest {
    pub from_account_id: i64,
    pub to_account_id: i64,
    /// Amount as a string to avoid float precision issues in JSON
    pub amount: String,
    pub idempotency_key: String,
}

#[derive(Debug, Serialize)]
pub struct TransferApiResponse {
    pub transaction_id: TransactionId,
    pub status: String,
    pub debited_from: i64,
    pub credited_to: i64,
    pub amount: Decimal,
}

impl From<TransferOutcome> for TransferApiResponse {
    fn from(outcome: TransferOutcome) -> Self {
        Self {
            transaction_id: outcome.transaction_id,
            status: outcome.status.as_str().to_string(),
            debited_from: outcome.debited_from,
            credited_to: outcome.credited_to,
            amount: outcome.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccountApiResponse {
    pub account_id: i64,
    pub holder_name: String,
    pub balance: Decimal,
    pub status: String,
}

impl From<Account> for AccountApiResponse {
    fn from(account: Account) -> Self {
        Self {
            account_id: account.account_id,
            holder_name: account.holder_name,
            balance: account.balance,
            status: account.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BalanceApiResponse {
    pub account_id: i64,
    pub balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct TransactionApiResponse {
    pub transaction_id: TransactionId,
    pub from_account: i64,
    pub to_account: i64,
    pub amount: Decimal,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    pub idempotency_key: String,
    pub created_at: DateTime<Utc>,
}

impl From<TransferRecord> for TransactionApiResponse {
    fn from(record: TransferRecord) -> Self {
        Self {
            transaction_id: record.transaction_id,
            from_account: record.from_account,
            to_account: record.to_account,
            amount: record.amount,
            status: record.status.as_str().to_string(),
            failure_reason: record.failure_reason,
            idempotency_key: record.idempotency_key,
            created_at: record.created_at,
        }
    }
}
