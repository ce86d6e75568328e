//! Transfer engine module
//!
//! Moves money between two accounts exactly once per idempotency key.

pub mod engine;
pub mod error;
pub mod types;
pub mod validation;


pub use engine::TransferEngine;
pub use error::TransferError;
pub use types::{
    TransactionId, TransactionStatus, TransferOutcome, TransferRecord, TransferRequest,
};
