//! Reader endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        item::CatalogEntry,
        patron::{NewPatron, Patron},
    },
};

/// List registered readers with their holdings
#[utoipa::path(
    get,
    path = "/patrons",
    tag = "patrons",
    responses(
        (status = 200, description = "Readers in registration order", body = Vec<Patron>)
    )
)]
pub async fn list_patrons(State(state): State<crate::AppState>) -> Json<Vec<Patron>> {
    let ledger = state.ledger.lock().await;
    Json(ledger.patrons().to_vec())
}

/// Register a reader
#[utoipa::path(
    post,
    path = "/patrons",
    tag = "patrons",
    request_body = NewPatron,
    responses(
        (status = 201, description = "Reader registered", body = Patron),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Reader ID already registered")
    )
)]
pub async fn create_patron(
    State(state): State<crate::AppState>,
    Json(request): Json<NewPatron>,
) -> AppResult<(StatusCode, Json<Patron>)> {
    request.validate()?;

    let patron = Patron::from(request);
    state.ledger.lock().await.register_patron(patron.clone())?;

    Ok((StatusCode::CREATED, Json(patron)))
}

/// Get one reader
#[utoipa::path(
    get,
    path = "/patrons/{id}",
    tag = "patrons",
    params(
        ("id" = i32, Path, description = "Reader ID")
    ),
    responses(
        (status = 200, description = "Reader details", body = Patron),
        (status = 404, description = "Reader not found")
    )
)]
pub async fn get_patron(
    State(state): State<crate::AppState>,
    Path(patron_id): Path<i32>,
) -> AppResult<Json<Patron>> {
    let ledger = state.ledger.lock().await;
    Ok(Json(ledger.patron(patron_id)?.clone()))
}

/// Entries currently held by a reader
#[utoipa::path(
    get,
    path = "/patrons/{id}/items",
    tag = "patrons",
    params(
        ("id" = i32, Path, description = "Reader ID")
    ),
    responses(
        (status = 200, description = "Held entries in borrowing order", body = Vec<CatalogEntry>),
        (status = 404, description = "Reader not found")
    )
)]
pub async fn get_patron_items(
    State(state): State<crate::AppState>,
    Path(patron_id): Path<i32>,
) -> AppResult<Json<Vec<CatalogEntry>>> {
    let ledger = state.ledger.lock().await;
    Ok(Json(ledger.patron_items(patron_id)?.to_vec()))
}
