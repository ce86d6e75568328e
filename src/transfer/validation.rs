//! Transfer request validation
//!
//! Pure checks over the request and freshly read account snapshots. No side
//! effects: the engine re-reads accounts right before calling in, so the
//! snapshots are as current as the store can make them.

use rust_decimal::Decimal;

use crate::account::Account;

use super::error::TransferError;
use super::types::TransferRequest;

/// Validate a transfer against current account snapshots.
///
/// Returns the owned snapshots on success so the engine can mutate them.
/// Check order: distinct accounts, existence, active status, positive amount,
/// sufficient source balance.
pub fn validate_transfer(
    req: &TransferRequest,
    from: Option<Account>,
    to: Option<Account>,
) -> Result<(Account, Account), TransferError> {
    if req.from_account == req.to_account {
        return Err(TransferError::InvalidRequest(
            "Source and destination accounts must be different".to_string(),
        ));
    }

    let from = from.ok_or(TransferError::AccountNotFound(req.from_account))?;
    let to = to.ok_or(TransferError::AccountNotFound(req.to_account))?;

    if !from.is_active() {
        return Err(TransferError::AccountNotActive(from.account_id));
    }
    if !to.is_active() {
        return Err(TransferError::AccountNotActive(to.account_id));
    }

    // The engine does not trust upstream schema validation
    if req.amount <= Decimal::ZERO {
        return Err(TransferError::InvalidRequest(
            "Amount must be greater than zero".to_string(),
        ));
    }

    if from.balance < req.amount {
        return Err(TransferError::InsufficientBalance {
            balance: from.balance,
            required: req.amount,
        });
    }

    Ok((from, to))
}
