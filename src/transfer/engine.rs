//! Transfer Engine
//!
//! Orchestrates one transfer per call: duplicate gate, validation, the
//! debit/credit mutation, record persistence, response construction.
//!
//! Terminal outcomes per request:
//! - REJECTED: duplicate key or validation failure, nothing persisted.
//! - SUCCESS: both balances and a SUCCESS record committed atomically.
//! - FAILED: mutation-phase error; a FAILED record with the failure reason is
//!   persisted and the error re-raised, so every attempt that reached the
//!   mutation phase leaves a durable audit trail.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::account::Account;
use crate::store::{LedgerStore, StoreError};

use super::error::TransferError;
use super::types::{TransactionStatus, TransferOutcome, TransferRecord, TransferRequest};
use super::validation::validate_transfer;

/// Why the mutation phase did not commit
enum MutationError {
    /// Lost the idempotency-key insert race to a concurrent request
    DuplicateKey,
    /// Attempted and failed; goes into the audit trail
    Failed(TransferError),
}

pub struct TransferEngine {
    store: Arc<dyn LedgerStore>,
}

impl TransferEngine {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn LedgerStore> {
        &self.store
    }

    /// Execute a transfer with at-most-once effect per idempotency key.
    pub async fn transfer(&self, req: TransferRequest) -> Result<TransferOutcome, TransferError> {
        info!(
            from = req.from_account,
            to = req.to_account,
            amount = %req.amount,
            idempotency_key = %req.idempotency_key,
            "Processing transfer request"
        );

        // Duplicate gate: a prior record for this key, SUCCESS or FAILED,
        // means the request was already fully processed.
        if let Some(existing) = self
            .store
            .find_by_idempotency_key(&req.idempotency_key)
            .await?
        {
            info!(
                idempotency_key = %req.idempotency_key,
                transaction_id = %existing.transaction_id,
                "Duplicate idempotency key, rejecting"
            );
            return Err(TransferError::DuplicateTransfer {
                idempotency_key: req.idempotency_key,
                transaction_id: existing.transaction_id,
            });
        }

        // Re-read accounts; time has passed since any caller-side snapshot.
        let from = self.store.get_account(req.from_account).await?;
        let to = self.store.get_account(req.to_account).await?;
        let (mut from, mut to) = validate_transfer(&req, from, to)?;

        // Past this point the attempt is recorded whatever happens.
        let mut record = TransferRecord::new(&req);

        match self.apply_mutation(&mut from, &mut to, &record).await {
            Ok(()) => {
                info!(
                    transaction_id = %record.transaction_id,
                    "Transfer completed successfully"
                );
                Ok(TransferOutcome {
                    transaction_id: record.transaction_id,
                    status: TransactionStatus::Success,
                    debited_from: record.from_account,
                    credited_to: record.to_account,
                    amount: record.amount,
                })
            }
            Err(MutationError::DuplicateKey) => {
                Err(self.resolve_duplicate(&req.idempotency_key).await)
            }
            Err(MutationError::Failed(err)) => {
                record.mark_failed(err.to_string());
                match self.store.save_record(&record).await {
                    Ok(()) => {}
                    // A concurrent request with the same key finished first
                    // while this attempt was failing; the winner's record
                    // stands and this request is a duplicate, not a failure.
                    Err(StoreError::DuplicateKey(_)) => {
                        return Err(self.resolve_duplicate(&req.idempotency_key).await);
                    }
                    Err(save_err) => {
                        // The error still propagates; only the audit entry is lost.
                        warn!(
                            transaction_id = %record.transaction_id,
                            error = %save_err,
                            "Could not persist FAILED record"
                        );
                    }
                }
                error!(
                    transaction_id = %record.transaction_id,
                    error = %err,
                    "Transfer failed"
                );
                Err(err)
            }
        }
    }

    /// Debit, credit, and commit as one unit.
    ///
    /// Debit before credit: if the debit fails no money has moved. The commit
    /// itself is all-or-nothing in the store, so a failure after the debit
    /// discards both in-memory account writes.
    async fn apply_mutation(
        &self,
        from: &mut Account,
        to: &mut Account,
        record: &TransferRecord,
    ) -> Result<(), MutationError> {
        from.debit(record.amount)
            .map_err(|e| MutationError::Failed(e.into()))?;
        to.credit(record.amount)
            .map_err(|e| MutationError::Failed(e.into()))?;

        match self.store.commit_transfer(from, to, record).await {
            Ok(()) => Ok(()),
            Err(StoreError::DuplicateKey(_)) => Err(MutationError::DuplicateKey),
            Err(e) => Err(MutationError::Failed(e.into())),
        }
    }

    /// Build the DuplicateTransfer error for a key that lost the insert race,
    /// pointing at the record that won.
    async fn resolve_duplicate(&self, key: &str) -> TransferError {
        match self.store.find_by_idempotency_key(key).await {
            Ok(Some(existing)) => {
                info!(
                    idempotency_key = %key,
                    transaction_id = %existing.transaction_id,
                    "Lost idempotency race to concurrent request"
                );
                TransferError::DuplicateTransfer {
                    idempotency_key: key.to_string(),
                    transaction_id: existing.transaction_id,
                }
            }
            Ok(None) => TransferError::Storage(format!(
                "Insert reported duplicate key {} but no record found",
                key
            )),
            Err(e) => e.into(),
        }
    }
}
