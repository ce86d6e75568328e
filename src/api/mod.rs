//! HTTP API surface

pub mod handlers;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::account::AccountService;
use crate::store::LedgerStore;
use crate::transfer::TransferEngine;

/// Shared application state
pub struct AppState {
    pub engine: TransferEngine,
    pub accounts: AccountService,
}

impl AppState {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            engine: TransferEngine::new(store.clone()),
            accounts: AccountService::new(store),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/transfer", post(handlers::transfer))
        .route("/api/v1/accounts/{id}", get(handlers::get_account))
        .route("/api/v1/accounts/{id}/balance", get(handlers::get_balance))
        .route(
            "/api/v1/accounts/{id}/transactions",
            get(handlers::get_transactions),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
}
