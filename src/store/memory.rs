//! In-memory ledger store
//!
//! Backs the engine test suite and local runs without PostgreSQL. One mutex
//! over the whole ledger makes `commit_transfer` trivially atomic, which is
//! exactly the semantics the Postgres store provides via a transaction.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::account::Account;
use crate::transfer::types::TransferRecord;

use super::{LedgerStore, StoreError};

#[derive(Default)]
struct Ledger {
    accounts: HashMap<i64, Account>,
    /// Records in insertion order; idempotency index maps key -> position
    records: Vec<TransferRecord>,
    by_key: HashMap<String, usize>,
}

impl Ledger {
    fn check_version(&self, account: &Account) -> Result<(), StoreError> {
        match self.accounts.get(&account.account_id) {
            Some(stored) if stored.version == account.version => Ok(()),
            Some(_) => Err(StoreError::VersionConflict),
            None => Err(StoreError::Database(format!(
                "Account {} does not exist",
                account.account_id
            ))),
        }
    }

    fn apply_account(&mut self, account: &Account) -> Account {
        let mut stored = account.clone();
        stored.version += 1;
        stored.last_updated = Utc::now();
        self.accounts.insert(stored.account_id, stored.clone());
        stored
    }

    fn insert_record(&mut self, record: &TransferRecord) -> Result<(), StoreError> {
        if self.by_key.contains_key(&record.idempotency_key) {
            return Err(StoreError::DuplicateKey(record.idempotency_key.clone()));
        }
        self.by_key
            .insert(record.idempotency_key.clone(), self.records.len());
        self.records.push(record.clone());
        Ok(())
    }
}

/// Mutex-guarded in-memory store
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Ledger>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the ledger, recovering the guard if a holder panicked.
    /// Every mutation validates before it writes, so the data behind a
    /// poisoned lock is still consistent.
    fn ledger(&self) -> std::sync::MutexGuard<'_, Ledger> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Seed an account (test/bootstrap helper, not part of the store trait)
    pub fn insert_account(&self, account: Account) {
        let mut ledger = self.ledger();
        ledger.accounts.insert(account.account_id, account);
    }

    /// Number of persisted transfer records
    pub fn record_count(&self) -> usize {
        self.ledger().records.len()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn get_account(&self, account_id: i64) -> Result<Option<Account>, StoreError> {
        let ledger = self.ledger();
        Ok(ledger.accounts.get(&account_id).cloned())
    }

    async fn save_account(&self, account: &Account) -> Result<Account, StoreError> {
        let mut ledger = self.ledger();
        ledger.check_version(account)?;
        Ok(ledger.apply_account(account))
    }

    async fn find_by_idempotency_key(
        &self,
        key: &str,
    ) -> Result<Option<TransferRecord>, StoreError> {
        let ledger = self.ledger();
        Ok(ledger.by_key.get(key).map(|&i| ledger.records[i].clone()))
    }

    async fn find_by_account(&self, account_id: i64) -> Result<Vec<TransferRecord>, StoreError> {
        let ledger = self.ledger();
        let mut records: Vec<TransferRecord> = ledger
            .records
            .iter()
            .filter(|r| r.from_account == account_id || r.to_account == account_id)
            .cloned()
            .collect();
        // Most recent first
        records.reverse();
        Ok(records)
    }

    async fn save_record(&self, record: &TransferRecord) -> Result<(), StoreError> {
        let mut ledger = self.ledger();
        ledger.insert_record(record)
    }

    async fn commit_transfer(
        &self,
        from: &Account,
        to: &Account,
        record: &TransferRecord,
    ) -> Result<(), StoreError> {
        let mut ledger = self.ledger();

        // Key uniqueness decides same-key races, so it is checked first
        if ledger.by_key.contains_key(&record.idempotency_key) {
            return Err(StoreError::DuplicateKey(record.idempotency_key.clone()));
        }
        ledger.check_version(from)?;
        ledger.check_version(to)?;

        ledger.insert_record(record)?;
        ledger.apply_account(from);
        ledger.apply_account(to);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
