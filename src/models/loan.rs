//! Lend/return request and receipt types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::item::CatalogEntry;

/// Lend or return request: the reader and the title to move
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoanRequest {
    pub patron_id: i32,
    pub title: String,
}

/// Which entry moved, and where it went
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoanReceipt {
    pub patron_id: i32,
    pub entry: CatalogEntry,
    pub status: LoanStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// Moved from the shelf to the reader
    Lent,
    /// Moved from the reader back to the shelf
    Returned,
}
