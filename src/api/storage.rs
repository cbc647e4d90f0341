//! Save/load endpoints, always against the configured data file

use std::io;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, services::Ledger};

#[derive(Serialize, ToSchema)]
pub struct StorageResponse {
    /// Data file used
    pub path: String,
    pub library: String,
    /// Entries on the shelf
    pub shelved: usize,
    /// Registered readers
    pub patrons: usize,
}

/// Run file I/O on the blocking pool
async fn blocking<T, F>(work: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
}

impl StorageResponse {
    fn describe(state: &crate::AppState, ledger: &Ledger) -> Self {
        Self {
            path: state.config.library.data_file.display().to_string(),
            library: ledger.name().to_string(),
            shelved: ledger.shelf().len(),
            patrons: ledger.patrons().len(),
        }
    }
}

/// Write the whole ledger to the data file
#[utoipa::path(
    post,
    path = "/storage/save",
    tag = "storage",
    responses(
        (status = 200, description = "Library saved", body = StorageResponse),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn save_library(State(state): State<crate::AppState>) -> AppResult<Json<StorageResponse>> {
    let snapshot = state.ledger.lock().await.clone();

    let store = state.store.clone();
    let path = state.config.library.data_file.clone();
    let snapshot = blocking(move || store.save(&snapshot, &path).map(|()| snapshot)).await?;

    Ok(Json(StorageResponse::describe(&state, &snapshot)))
}

/// Replace the ledger with the data file's contents
#[utoipa::path(
    post,
    path = "/storage/load",
    tag = "storage",
    responses(
        (status = 200, description = "Library loaded", body = StorageResponse),
        (status = 404, description = "Data file not found"),
        (status = 422, description = "Data file malformed")
    )
)]
pub async fn load_library(State(state): State<crate::AppState>) -> AppResult<Json<StorageResponse>> {
    let store = state.store.clone();
    let path = state.config.library.data_file.clone();
    let loaded = blocking(move || store.load(&path)).await?;

    let response = StorageResponse::describe(&state, &loaded);
    *state.ledger.lock().await = loaded;
    Ok(Json(response))
}
