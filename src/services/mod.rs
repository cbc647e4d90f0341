//! Business logic services

pub mod ledger;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use ledger::Ledger;

/// Ledger handle shared by concurrent callers.
///
/// One lock guards the whole ledger; lend and return hold it for the full
/// two-container move.
pub type SharedLedger = Arc<Mutex<Ledger>>;

pub fn shared(ledger: Ledger) -> SharedLedger {
    Arc::new(Mutex::new(ledger))
}
