//! On-disk record types
//!
//! Field names follow the saved document, not the in-memory model:
//! `library`, `books`, `readers`, `reader_id`, `borrowed_books`.

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, Patron},
    services::Ledger,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderRecord {
    pub name: String,
    pub reader_id: i32,
    pub borrowed_books: Vec<BookRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryRecord {
    pub library: String,
    pub books: Vec<BookRecord>,
    pub readers: Vec<ReaderRecord>,
}

impl From<&CatalogEntry> for BookRecord {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.title.clone(),
            author: entry.author.clone(),
            year: entry.publication_year,
            genre: entry.genre.clone(),
        }
    }
}

impl From<BookRecord> for CatalogEntry {
    fn from(book: BookRecord) -> Self {
        CatalogEntry::new(book.title, book.author, book.year, book.genre)
    }
}

impl From<&Patron> for ReaderRecord {
    fn from(patron: &Patron) -> Self {
        Self {
            name: patron.name.clone(),
            reader_id: patron.patron_id,
            borrowed_books: patron.held_items().iter().map(BookRecord::from).collect(),
        }
    }
}

impl From<ReaderRecord> for Patron {
    fn from(reader: ReaderRecord) -> Self {
        let held = reader.borrowed_books.into_iter().map(CatalogEntry::from).collect();
        Patron::with_items(reader.name, reader.reader_id, held)
    }
}

impl From<&Ledger> for LibraryRecord {
    fn from(ledger: &Ledger) -> Self {
        Self {
            library: ledger.name().to_string(),
            books: ledger.shelf().iter().map(BookRecord::from).collect(),
            readers: ledger.patrons().iter().map(ReaderRecord::from).collect(),
        }
    }
}

impl LibraryRecord {
    /// Rebuild the ledger; readers keep their saved order and holdings
    pub fn into_ledger(self) -> AppResult<Ledger> {
        let shelf = self.books.into_iter().map(CatalogEntry::from).collect();
        let patrons = self.readers.into_iter().map(Patron::from).collect();

        Ledger::from_parts(self.library, shelf, patrons).map_err(|e| match e {
            AppError::DuplicateId(id) => {
                AppError::ParseError(format!("reader_id {} appears more than once", id))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readers_keep_holdings_positionally() {
        let record: LibraryRecord = serde_json::from_str(
            r#"{
                "library": "Branch",
                "books": [{"title": "Dune", "author": "Herbert", "year": 1965, "genre": "SciFi"}],
                "readers": [
                    {"name": "Alice", "reader_id": 7, "borrowed_books": []},
                    {"name": "Bob", "reader_id": 3, "borrowed_books": [
                        {"title": "Emma", "author": "Austen", "year": 1815, "genre": "Novel"}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        let ledger = record.into_ledger().unwrap();
        assert_eq!(ledger.name(), "Branch");
        assert_eq!(ledger.shelf().len(), 1);
        assert!(ledger.patron_items(7).unwrap().is_empty());
        assert_eq!(ledger.patron_items(3).unwrap()[0].title, "Emma");
    }
}
