//! Data models for the lending ledger

pub mod item;
pub mod loan;
pub mod patron;

// Re-export commonly used types
pub use item::{CatalogEntry, EntryIdentity, EntryQuery, NewEntry};
pub use loan::{LoanReceipt, LoanRequest, LoanStatus};
pub use patron::{NewPatron, Patron};
