//! Transfer Core Types
//!
//! Request, record, and outcome types for the transfer engine.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transaction ID - UUID-based unique identifier
///
/// Generated once per transfer attempt and never reused. The wrapper keeps
/// transaction ids from being mixed up with account ids in signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Generate a new unique TransactionId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Terminal status of a persisted transfer record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
pub enum TransactionStatus {
    Success = 1,
    Failed = 2,
}

impl TransactionStatus {
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(TransactionStatus::Success),
            2 => Some(TransactionStatus::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Success => "SUCCESS",
            TransactionStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transfer request from the API layer
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub from_account: i64,
    pub to_account: i64,
    /// Positive decimal amount
    pub amount: Decimal,
    /// Client-provided idempotency key
    pub idempotency_key: String,
}

impl TransferRequest {
    pub fn new(
        from_account: i64,
        to_account: i64,
        amount: Decimal,
        idempotency_key: impl Into<String>,
    ) -> Self {
        Self {
            from_account,
            to_account,
            amount,
            idempotency_key: idempotency_key.into(),
        }
    }
}

/// Durable audit record of one transfer attempt
///
/// Persisted exactly once per idempotency key, with the terminal status fixed
/// at persistence time. Never updated afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRecord {
    pub transaction_id: TransactionId,
    pub from_account: i64,
    pub to_account: i64,
    pub amount: Decimal,
    pub status: TransactionStatus,
    /// Present iff status is Failed
    pub failure_reason: Option<String>,
    pub idempotency_key: String,
    pub created_at: DateTime<Utc>,
}

impl TransferRecord {
    /// Create an in-memory record for a transfer about to be attempted.
    ///
    /// Status starts as Success; a mutation-phase failure flips it to Failed
    /// before the record is persisted.
    pub fn new(req: &TransferRequest) -> Self {
        Self {
            transaction_id: TransactionId::new(),
            from_account: req.from_account,
            to_account: req.to_account,
            amount: req.amount,
            status: TransactionStatus::Success,
            failure_reason: None,
            idempotency_key: req.idempotency_key.clone(),
            created_at: Utc::now(),
        }
    }

    /// Mark this attempt as failed before persistence.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = TransactionStatus::Failed;
        self.failure_reason = Some(reason.into());
    }
}

impl fmt::Display for TransferRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transfer[{}] {} -> {} amount={} status={} key={}",
            self.transaction_id,
            self.from_account,
            self.to_account,
            self.amount,
            self.status,
            self.idempotency_key
        )
    }
}

/// Successful engine response
#[derive(Debug, Clone, Serialize)]
pub struct TransferOutcome {
    pub transaction_id: TransactionId,
    pub status: TransactionStatus,
    pub debited_from: i64,
    pub credited_to: i64,
    pub amount: Decimal,
}
