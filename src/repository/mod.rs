//! Persistence layer: the ledger saved as a structured JSON document

pub mod records;

use std::fs;
use std::io;
use std::path::Path;

use crate::{
    config::LibraryConfig,
    error::{AppError, AppResult},
    services::Ledger,
};

use records::LibraryRecord;

/// Saves and restores a full ledger
#[cfg_attr(test, mockall::automock)]
pub trait LedgerStore {
    fn save(&self, ledger: &Ledger, path: &Path) -> AppResult<()>;

    /// Read a complete ledger. The caller's ledger is only replaced once this
    /// returns `Ok`.
    fn load(&self, path: &Path) -> AppResult<Ledger>;
}

/// File-backed store writing the `library` / `books` / `readers` document
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    pretty: bool,
}

impl JsonFileStore {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn encode(&self, record: &LibraryRecord) -> AppResult<Vec<u8>> {
        let mut buf = Vec::new();
        if self.pretty {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            serde::Serialize::serialize(record, &mut ser).map_err(io::Error::from)?;
        } else {
            serde_json::to_writer(&mut buf, record).map_err(io::Error::from)?;
        }
        Ok(buf)
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LedgerStore for JsonFileStore {
    fn save(&self, ledger: &Ledger, path: &Path) -> AppResult<()> {
        let bytes = self.encode(&LibraryRecord::from(ledger))?;

        // Encode fully before touching the file.
        fs::write(path, bytes)?;

        tracing::info!(
            "Saved library \"{}\" to {} ({} shelved, {} readers)",
            ledger.name(),
            path.display(),
            ledger.shelf().len(),
            ledger.patrons().len()
        );
        Ok(())
    }

    fn load(&self, path: &Path) -> AppResult<Ledger> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AppError::FileNotFound(path.to_path_buf()),
            _ => AppError::Io(e),
        })?;

        let record: LibraryRecord = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!("Rejected library file {}: {}", path.display(), e);
            AppError::ParseError(e.to_string())
        })?;

        let ledger = record.into_ledger()?;
        tracing::info!(
            "Loaded library \"{}\" from {} ({} shelved, {} readers)",
            ledger.name(),
            path.display(),
            ledger.shelf().len(),
            ledger.patrons().len()
        );
        Ok(ledger)
    }
}

/// Ledger to start from: the data file when configured and readable, else an
/// empty library with the configured name.
///
/// A missing or malformed data file is logged and skipped; other I/O errors
/// are returned.
pub fn open_ledger<S: LedgerStore + ?Sized>(store: &S, library: &LibraryConfig) -> AppResult<Ledger> {
    if !library.load_on_start {
        return Ok(Ledger::new(library.name.clone()));
    }

    match store.load(&library.data_file) {
        Ok(ledger) => Ok(ledger),
        Err(AppError::FileNotFound(path)) => {
            tracing::info!("No data file at {}, starting empty", path.display());
            Ok(Ledger::new(library.name.clone()))
        }
        Err(AppError::ParseError(detail)) => {
            tracing::warn!(
                "Data file {} is not a library file ({}), starting empty",
                library.data_file.display(),
                detail
            );
            Ok(Ledger::new(library.name.clone()))
        }
        Err(e) => Err(e),
    }
}
