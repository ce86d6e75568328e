//! Read-only account queries
//!
//! Account creation and lifecycle are out of scope; this service only exposes
//! what the transfer surface needs to show callers.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::store::LedgerStore;
use crate::transfer::error::TransferError;
use crate::transfer::types::TransferRecord;

use super::Account;

pub struct AccountService {
    store: Arc<dyn LedgerStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn get_account(&self, account_id: i64) -> Result<Account, TransferError> {
        self.store
            .get_account(account_id)
            .await?
            .ok_or(TransferError::AccountNotFound(account_id))
    }

    pub async fn get_balance(&self, account_id: i64) -> Result<Decimal, TransferError> {
        Ok(self.get_account(account_id).await?.balance)
    }

    /// Transfer history where the account is sender or receiver,
    /// most recent first.
    pub async fn get_transactions(
        &self,
        account_id: i64,
    ) -> Result<Vec<TransferRecord>, TransferError> {
        // The account must exist; an empty history is not a 404
        self.get_account(account_id).await?;
        Ok(self.store.find_by_account(account_id).await?)
    }
}
