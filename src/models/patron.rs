//! Patron (registered reader) model and related types

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::item::CatalogEntry;
use crate::error::{AppError, AppResult};

/// A registered reader and the entries they currently hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Patron {
    pub name: String,
    pub patron_id: i32,
    held_items: Vec<CatalogEntry>,
}

impl Patron {
    pub fn new(name: impl Into<String>, patron_id: i32) -> Self {
        Self {
            name: name.into(),
            patron_id,
            held_items: Vec::new(),
        }
    }

    /// Rebuild a reader with holdings, e.g. from a saved library file
    pub(crate) fn with_items(name: impl Into<String>, patron_id: i32, held_items: Vec<CatalogEntry>) -> Self {
        Self {
            name: name.into(),
            patron_id,
            held_items,
        }
    }

    /// Entries held, in borrowing order
    pub fn held_items(&self) -> &[CatalogEntry] {
        &self.held_items
    }

    /// Take possession of an entry.
    ///
    /// Shelf and uniqueness rules belong to the ledger and are not checked here.
    pub fn acquire(&mut self, entry: CatalogEntry) {
        self.held_items.push(entry);
    }

    /// Give back the first held entry with the same identity as `entry`
    pub fn release(&mut self, entry: &CatalogEntry) -> AppResult<CatalogEntry> {
        let position = self
            .held_items
            .iter()
            .position(|held| held.same_work(entry))
            .ok_or_else(|| AppError::NotHeld(entry.to_string()))?;

        Ok(self.held_items.remove(position))
    }

    /// First held entry carrying `title`
    pub fn find_held(&self, title: &str) -> Option<&CatalogEntry> {
        self.held_items.iter().find(|entry| entry.has_title(title))
    }
}

impl fmt::Display for Patron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {}), borrowed: ", self.name, self.patron_id)?;
        for (idx, entry) in self.held_items.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewPatron {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub patron_id: i32,
}

impl From<NewPatron> for Patron {
    fn from(patron: NewPatron) -> Self {
        Patron::new(patron.name, patron.patron_id)
    }
}
