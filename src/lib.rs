//! Lending Ledger
//!
//! Tracks a library's shelf, its registered readers and which reader holds
//! which book. Driven either by the interactive shell or by the REST API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod shell;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use services::{Ledger, SharedLedger};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub ledger: SharedLedger,
    pub store: Arc<dyn repository::LedgerStore + Send + Sync>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        ledger: Ledger,
        store: impl repository::LedgerStore + Send + Sync + 'static,
    ) -> Self {
        Self {
            config: Arc::new(config),
            ledger: services::shared(ledger),
            store: Arc::new(store),
        }
    }
}
