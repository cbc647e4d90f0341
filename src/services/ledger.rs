//! Lending ledger: the shelf, the registered readers and the moves between them
//!
//! Every entry reachable from a [`Ledger`] lives in exactly one container, the
//! shelf or one reader's holdings. Lending and returning move an entry between
//! two containers inside one `&mut self` call, so no caller ever observes it
//! in both or in neither.

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, Patron},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    name: String,
    shelf: Vec<CatalogEntry>,
    patrons: Vec<Patron>,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shelf: Vec::new(),
            patrons: Vec::new(),
        }
    }

    /// Assemble a ledger from already-built parts.
    ///
    /// Reader ids must be unique; duplicate entry identities are tolerated the
    /// same way [`Ledger::add_item`] tolerates them.
    pub fn from_parts(
        name: impl Into<String>,
        shelf: Vec<CatalogEntry>,
        patrons: Vec<Patron>,
    ) -> AppResult<Self> {
        let mut ledger = Self::new(name);
        ledger.shelf = shelf;
        for patron in patrons {
            ledger.register_patron(patron)?;
        }
        Ok(ledger)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries available for lending, in shelf order
    pub fn shelf(&self) -> &[CatalogEntry] {
        &self.shelf
    }

    /// Registered readers, in registration order
    pub fn patrons(&self) -> &[Patron] {
        &self.patrons
    }

    /// Put an entry on the shelf
    pub fn add_item(&mut self, entry: CatalogEntry) {
        tracing::info!("Shelved {}", entry);
        self.shelf.push(entry);
    }

    /// Take one shelved entry with the same identity off the shelf.
    ///
    /// An entry currently held by a reader is not on the shelf and cannot be
    /// removed this way.
    pub fn remove_item(&mut self, entry: &CatalogEntry) -> AppResult<CatalogEntry> {
        let position = self
            .shelf
            .iter()
            .position(|shelved| shelved.same_work(entry))
            .ok_or_else(|| {
                tracing::warn!("Remove rejected, not on shelf: {} by {}", entry.title, entry.author);
                AppError::NotFound(format!("{} by {}", entry.title, entry.author))
            })?;

        let removed = self.shelf.remove(position);
        tracing::info!("Removed {}", removed);
        Ok(removed)
    }

    pub fn register_patron(&mut self, patron: Patron) -> AppResult<()> {
        if self.patrons.iter().any(|p| p.patron_id == patron.patron_id) {
            tracing::warn!("Registration rejected, duplicate reader id {}", patron.patron_id);
            return Err(AppError::DuplicateId(patron.patron_id));
        }

        tracing::info!("Registered reader {} (ID: {})", patron.name, patron.patron_id);
        self.patrons.push(patron);
        Ok(())
    }

    /// Move the first shelved entry titled `title` to the reader.
    ///
    /// Author is not considered: with several same-titled works on the shelf,
    /// shelf order decides.
    pub fn lend_item(&mut self, patron_id: i32, title: &str) -> AppResult<CatalogEntry> {
        let patron_idx = self.patron_index(patron_id)?;
        let position = self
            .shelf
            .iter()
            .position(|entry| entry.has_title(title))
            .ok_or_else(|| {
                tracing::warn!("Lend rejected, \"{}\" not on shelf", title);
                AppError::ItemUnavailable(title.to_string())
            })?;

        let entry = self.shelf.remove(position);
        self.patrons[patron_idx].acquire(entry.clone());

        tracing::info!("Lent {} to reader {}", entry, patron_id);
        Ok(entry)
    }

    /// Move the first entry titled `title` held by the reader back to the shelf
    pub fn return_item(&mut self, patron_id: i32, title: &str) -> AppResult<CatalogEntry> {
        let patron_idx = self.patron_index(patron_id)?;
        let patron = &mut self.patrons[patron_idx];

        let held = patron.find_held(title).cloned().ok_or_else(|| {
            tracing::warn!("Return rejected, reader {} does not hold \"{}\"", patron_id, title);
            AppError::ItemNotHeld {
                patron_id,
                title: title.to_string(),
            }
        })?;

        // The first identity match is the first title match, so the same
        // entry comes back.
        let entry = patron.release(&held)?;
        self.shelf.push(entry.clone());

        tracing::info!("Reader {} returned {}", patron_id, entry);
        Ok(entry)
    }

    /// First shelved entry with `title`, narrowed by `author` when given
    pub fn find_item(&self, title: &str, author: Option<&str>) -> Option<&CatalogEntry> {
        let found = self.shelf.iter().find(|entry| entry.matches(title, author));
        tracing::debug!("Shelf lookup \"{}\" ({:?}): found={}", title, author, found.is_some());
        found
    }

    /// Entries currently held by the reader
    pub fn patron_items(&self, patron_id: i32) -> AppResult<&[CatalogEntry]> {
        self.patron(patron_id).map(Patron::held_items)
    }

    pub fn patron(&self, patron_id: i32) -> AppResult<&Patron> {
        self.patrons
            .iter()
            .find(|p| p.patron_id == patron_id)
            .ok_or(AppError::PatronNotFound(patron_id))
    }

    /// Id of the first reader holding an entry with `title` (and `author`)
    pub fn holder(&self, title: &str, author: Option<&str>) -> Option<i32> {
        self.patrons
            .iter()
            .find(|p| p.held_items().iter().any(|e| e.matches(title, author)))
            .map(|p| p.patron_id)
    }

    fn patron_index(&self, patron_id: i32) -> AppResult<usize> {
        self.patrons
            .iter()
            .position(|p| p.patron_id == patron_id)
            .ok_or_else(|| {
                tracing::debug!("Unknown reader id {}", patron_id);
                AppError::PatronNotFound(patron_id)
            })
    }
}
