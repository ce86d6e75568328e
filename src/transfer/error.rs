//! Transfer Error Types
//!
//! Every engine call either returns a success outcome or one of these
//! variants. Error codes are stable strings for API responses.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::BalanceError;
use crate::store::StoreError;
use crate::transfer::types::TransactionId;

/// Transfer error taxonomy
#[derive(Error, Debug, Clone)]
pub enum TransferError {
    // === Rejections (no audit record written) ===
    #[error("Account with ID {0} not found")]
    AccountNotFound(i64),

    #[error("Account with ID {0} is not active")]
    AccountNotActive(i64),

    #[error("Insufficient balance. Current balance: {balance}, Required: {required}")]
    InsufficientBalance { balance: Decimal, required: Decimal },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(
        "Duplicate transfer detected. Idempotency key: {idempotency_key}, Transaction ID: {transaction_id}"
    )]
    DuplicateTransfer {
        idempotency_key: String,
        transaction_id: TransactionId,
    },

    // === Mutation-phase failures (audit record written) ===
    #[error("Concurrent modification detected, please retry")]
    VersionConflict,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl TransferError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            TransferError::AccountNotActive(_) => "ACCOUNT_NOT_ACTIVE",
            TransferError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            TransferError::InvalidRequest(_) => "INVALID_REQUEST",
            TransferError::DuplicateTransfer { .. } => "DUPLICATE_TRANSFER",
            TransferError::VersionConflict => "VERSION_CONFLICT",
            TransferError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::AccountNotFound(_) => 404,
            TransferError::AccountNotActive(_) | TransferError::InsufficientBalance { .. } => 422,
            TransferError::InvalidRequest(_) => 400,
            TransferError::DuplicateTransfer { .. } | TransferError::VersionConflict => 409,
            TransferError::Storage(_) => 500,
        }
    }
}

impl From<BalanceError> for TransferError {
    fn from(e: BalanceError) -> Self {
        match e {
            BalanceError::NonPositiveAmount => {
                TransferError::InvalidRequest("Amount must be greater than zero".to_string())
            }
            BalanceError::Insufficient { balance, required } => {
                TransferError::InsufficientBalance { balance, required }
            }
        }
    }
}

impl From<StoreError> for TransferError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::VersionConflict => TransferError::VersionConflict,
            // DuplicateKey is resolved to DuplicateTransfer by the engine,
            // which knows the existing record's id. A bare conversion means
            // the lookup itself failed.
            StoreError::DuplicateKey(key) => {
                TransferError::Storage(format!("Duplicate idempotency key: {}", key))
            }
            StoreError::Database(msg) => TransferError::Storage(msg),
        }
    }
}
