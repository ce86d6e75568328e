//! Account management module

pub mod models;
pub mod service;

pub use models::{Account, AccountStatus, BalanceError};
pub use service::AccountService;
