//! Interactive text menu driving a ledger
//!
//! A thin dispatcher: every menu choice prompts for its fields, calls one
//! ledger or store operation and prints either the result or a message for
//! the error kind. No failure ends the loop; only `0` or end of input does.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, NewEntry, NewPatron, Patron},
    repository::LedgerStore,
    services::Ledger,
};

const MENU: &str = "
--- Library ---
1. Add a book
2. Remove a book
3. Register a reader
4. Lend a book to a reader
5. Return a book
6. Show a reader's books
7. Find a book
8. Show the shelf
9. Save data to file
10. Load data from file
0. Exit";

enum Flow {
    Continue,
    Exit,
}

pub struct Shell<'a, R, W, S: ?Sized> {
    ledger: &'a mut Ledger,
    store: &'a S,
    default_path: PathBuf,
    input: R,
    output: W,
}

impl<'a, R, W, S> Shell<'a, R, W, S>
where
    R: BufRead,
    W: Write,
    S: LedgerStore + ?Sized,
{
    pub fn new(
        ledger: &'a mut Ledger,
        store: &'a S,
        default_path: impl Into<PathBuf>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            ledger,
            store,
            default_path: default_path.into(),
            input,
            output,
        }
    }

    /// Run the menu loop until the user exits or input ends
    pub fn run(&mut self) -> AppResult<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let choice = match self.ask("Choose an action: ") {
                Ok(Some(choice)) => choice,
                Ok(None) => break,
                // Unreadable line: the bytes are consumed, so ask again.
                Err(AppError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                    tracing::debug!("Unreadable menu choice: {}", e);
                    writeln!(self.output, "{}", describe(&AppError::Io(e)))?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            match self.dispatch(choice.trim()) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => {
                    tracing::debug!("Shell command failed: {}", e);
                    writeln!(self.output, "{}", describe(&e))?;
                }
            }
        }
        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> AppResult<Flow> {
        match choice {
            "1" => self.add_book()?,
            "2" => self.remove_book()?,
            "3" => self.register_reader()?,
            "4" => self.lend_book()?,
            "5" => self.return_book()?,
            "6" => self.show_reader_books()?,
            "7" => self.find_book()?,
            "8" => self.show_shelf()?,
            "9" => self.save()?,
            "10" => self.load()?,
            "0" => return Ok(Flow::Exit),
            _ => writeln!(self.output, "Invalid choice. Please try again.")?,
        }
        Ok(Flow::Continue)
    }

    fn add_book(&mut self) -> AppResult<()> {
        let entry = NewEntry {
            title: self.require("Book title: ")?,
            author: self.require("Author: ")?,
            year: self.require_number("Publication year: ")?,
            genre: self.require("Genre: ")?,
        };
        entry.validate()?;

        self.ledger.add_item(entry.into());
        writeln!(self.output, "Book added.")?;
        Ok(())
    }

    fn remove_book(&mut self) -> AppResult<()> {
        let title = self.require("Book title: ")?;
        let author = self.require("Author: ")?;

        let removed = self.ledger.remove_item(&CatalogEntry::new(title, author, 0, ""))?;
        writeln!(self.output, "Book removed: {}", removed)?;
        Ok(())
    }

    fn register_reader(&mut self) -> AppResult<()> {
        let patron = NewPatron {
            name: self.require("Reader name: ")?,
            patron_id: self.require_number("Reader ID: ")?,
        };
        patron.validate()?;

        self.ledger.register_patron(Patron::from(patron))?;
        writeln!(self.output, "Reader registered.")?;
        Ok(())
    }

    fn lend_book(&mut self) -> AppResult<()> {
        let patron_id = self.require_number("Reader ID: ")?;
        let title = self.require("Book title: ")?;

        match self.ledger.lend_item(patron_id, &title) {
            Ok(entry) => writeln!(self.output, "Book lent: {}", entry)?,
            Err(e @ AppError::ItemUnavailable(_)) => {
                writeln!(self.output, "{}", describe(&e))?;
                if let Some(holder) = self.ledger.holder(&title, None) {
                    writeln!(self.output, "It is currently borrowed by reader {}.", holder)?;
                }
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn return_book(&mut self) -> AppResult<()> {
        let patron_id = self.require_number("Reader ID: ")?;
        let title = self.require("Book title: ")?;

        self.ledger.return_item(patron_id, &title)?;
        writeln!(self.output, "Book returned.")?;
        Ok(())
    }

    fn show_reader_books(&mut self) -> AppResult<()> {
        let patron_id = self.require_number("Reader ID: ")?;
        let items = self.ledger.patron_items(patron_id)?;

        writeln!(self.output, "Reader's books:")?;
        if items.is_empty() {
            writeln!(self.output, "(none)")?;
        }
        for entry in items {
            writeln!(self.output, "{}", entry)?;
        }
        Ok(())
    }

    fn find_book(&mut self) -> AppResult<()> {
        let title = self.require("Book title: ")?;
        let author = self.require("Author (leave empty for any): ")?;
        let author = Some(author.as_str()).filter(|a| !a.is_empty());

        match self.ledger.find_item(&title, author) {
            Some(entry) => writeln!(self.output, "Found: {}", entry)?,
            None => writeln!(self.output, "No matching book on the shelf.")?,
        }
        Ok(())
    }

    fn show_shelf(&mut self) -> AppResult<()> {
        writeln!(self.output, "Books in {}:", self.ledger.name())?;
        if self.ledger.shelf().is_empty() {
            writeln!(self.output, "(none)")?;
        }
        for entry in self.ledger.shelf() {
            writeln!(self.output, "{}", entry)?;
        }
        Ok(())
    }

    fn save(&mut self) -> AppResult<()> {
        let path = self.ask_path("File name to save to")?;
        self.store.save(&*self.ledger, &path)?;
        writeln!(self.output, "Data saved.")?;
        Ok(())
    }

    fn load(&mut self) -> AppResult<()> {
        let path = self.ask_path("File name to load from")?;
        *self.ledger = self.store.load(&path)?;
        writeln!(self.output, "Data loaded.")?;
        Ok(())
    }

    /// Prompt and read one line; `None` at end of input
    fn ask(&mut self, prompt: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn require(&mut self, prompt: &str) -> AppResult<String> {
        self.ask(prompt)?
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof).into())
    }

    fn require_number(&mut self, prompt: &str) -> AppResult<i32> {
        let raw = self.require(prompt)?;
        raw.trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("\"{}\" is not a valid number", raw.trim())))
    }

    fn ask_path(&mut self, label: &str) -> AppResult<PathBuf> {
        let prompt = format!("{} [{}]: ", label, self.default_path.display());
        let raw = self.require(&prompt)?;
        let raw = raw.trim();
        Ok(if raw.is_empty() {
            self.default_path.clone()
        } else {
            Path::new(raw).to_path_buf()
        })
    }
}

/// User-facing message for an error kind
pub fn describe(err: &AppError) -> String {
    match err {
        AppError::NotFound(_) => "Book not found in the library.".to_string(),
        AppError::DuplicateId(_) => "A reader with this ID is already registered.".to_string(),
        AppError::PatronNotFound(_) => "No reader with this ID.".to_string(),
        AppError::ItemUnavailable(_) => "The book is not available for lending.".to_string(),
        AppError::ItemNotHeld { .. } | AppError::NotHeld(_) => {
            "The reader does not have this book.".to_string()
        }
        AppError::FileNotFound(_) => "File not found.".to_string(),
        AppError::ParseError(detail) => format!("The file is not a valid library file ({}).", detail),
        AppError::Validation(detail) => format!("Invalid input: {}", detail),
        AppError::BadRequest(detail) => format!("Invalid input: {}", detail),
        AppError::Io(e) => format!("Input/output error: {}", e),
    }
}
