//! payrail - Idempotent Money Transfer Engine
//!
//! Moves money between two accounts exactly once per client-supplied
//! idempotency key. Conservation and non-negative balances are invariants;
//! every attempt that reaches the mutation phase leaves a durable audit record.
//!
//! # Modules
//!
//! - [`account`] - Account model and the debit/credit balance state machine
//! - [`transfer`] - The transfer engine: duplicate gate, validation, mutation
//! - [`store`] - Ledger store abstraction (PostgreSQL and in-memory)
//! - [`api`] - axum HTTP surface
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing setup
//! - [`db`] - PostgreSQL pool management

pub mod account;
pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod store;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{Account, AccountService, AccountStatus, BalanceError};
pub use config::AppConfig;
pub use store::{LedgerStore, MemoryStore, PgStore, StoreError};
pub use transfer::{
    TransactionId, TransactionStatus, TransferEngine, TransferError, TransferOutcome,
    TransferRecord, TransferRequest,
};
