//! Shelf endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::item::{CatalogEntry, EntryIdentity, EntryQuery, NewEntry},
};

/// Shelf lookup result
#[derive(Serialize, ToSchema)]
pub struct SearchResponse {
    /// First shelved match, if any
    pub item: Option<CatalogEntry>,
    /// Reader holding a match when nothing is on the shelf
    pub held_by: Option<i32>,
}

/// List entries on the shelf
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses(
        (status = 200, description = "Shelved entries in shelf order", body = Vec<CatalogEntry>)
    )
)]
pub async fn list_items(State(state): State<crate::AppState>) -> Json<Vec<CatalogEntry>> {
    let ledger = state.ledger.lock().await;
    Json(ledger.shelf().to_vec())
}

/// Find the first shelved entry by title, optionally narrowed by author
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(EntryQuery),
    responses(
        (status = 200, description = "Lookup result; `item` is null on a miss", body = SearchResponse)
    )
)]
pub async fn search_items(
    State(state): State<crate::AppState>,
    Query(query): Query<EntryQuery>,
) -> Json<SearchResponse> {
    let ledger = state.ledger.lock().await;
    let author = query.author.as_deref();

    let item = ledger.find_item(&query.title, author).cloned();
    let held_by = match item {
        Some(_) => None,
        None => ledger.holder(&query.title, author),
    };

    Json(SearchResponse { item, held_by })
}

/// Put a new entry on the shelf
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = NewEntry,
    responses(
        (status = 201, description = "Entry shelved", body = CatalogEntry),
        (status = 400, description = "Invalid entry")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    Json(request): Json<NewEntry>,
) -> AppResult<(StatusCode, Json<CatalogEntry>)> {
    request.validate()?;

    let entry = CatalogEntry::from(request);
    state.ledger.lock().await.add_item(entry.clone());

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Remove one shelved entry by title and author
#[utoipa::path(
    delete,
    path = "/items",
    tag = "items",
    request_body = EntryIdentity,
    responses(
        (status = 200, description = "Removed entry", body = CatalogEntry),
        (status = 404, description = "No such entry on the shelf")
    )
)]
pub async fn delete_item(
    State(state): State<crate::AppState>,
    Json(request): Json<EntryIdentity>,
) -> AppResult<Json<CatalogEntry>> {
    let target = CatalogEntry::new(request.title, request.author, 0, "");
    let removed = state.ledger.lock().await.remove_item(&target)?;
    Ok(Json(removed))
}
