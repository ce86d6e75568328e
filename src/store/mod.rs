//! Ledger store abstraction
//!
//! The engine never talks to a database directly: it goes through
//! [`LedgerStore`], which hides whether the backing store is PostgreSQL or
//! the in-memory store used by tests. Multiple engine instances may share one
//! backing store, so the uniqueness constraint on the idempotency key and the
//! per-account version check are enforced here, not in process memory.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::account::Account;
use crate::transfer::types::TransferRecord;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage-layer errors
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// Conditional write lost: the row's version moved since it was read
    #[error("Version conflict: account was modified concurrently")]
    VersionConflict,

    /// Unique constraint violation on the idempotency key
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Persistence seam for accounts and transfer records
///
/// `commit_transfer` is the only multi-write operation and must be atomic:
/// both account writes and the record insert land together or not at all.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Fetch an account by id
    async fn get_account(&self, account_id: i64) -> Result<Option<Account>, StoreError>;

    /// Conditional write keyed on the version the caller read.
    ///
    /// On success the stored version is bumped and the updated account is
    /// returned. A mismatch yields `VersionConflict`.
    async fn save_account(&self, account: &Account) -> Result<Account, StoreError>;

    /// Look up a transfer record by idempotency key
    async fn find_by_idempotency_key(
        &self,
        key: &str,
    ) -> Result<Option<TransferRecord>, StoreError>;

    /// All records where the account is sender or receiver, most recent first
    async fn find_by_account(&self, account_id: i64) -> Result<Vec<TransferRecord>, StoreError>;

    /// Insert a transfer record.
    ///
    /// Fails with `DuplicateKey` if the idempotency key already exists;
    /// this is the race-safety mechanism behind the duplicate gate.
    async fn save_record(&self, record: &TransferRecord) -> Result<(), StoreError>;

    /// Atomically persist the full outcome of a transfer: the record insert
    /// plus both version-checked account writes. The record insert is applied
    /// first so that a same-key race surfaces as `DuplicateKey` rather than
    /// `VersionConflict`.
    async fn commit_transfer(
        &self,
        from: &Account,
        to: &Account,
        record: &TransferRecord,
    ) -> Result<(), StoreError>;

    /// Liveness probe for the backing store
    async fn health_check(&self) -> Result<(), StoreError>;
}
