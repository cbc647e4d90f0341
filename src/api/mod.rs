//! HTTP handlers driving the ledger

pub mod health;
pub mod items;
pub mod loans;
pub mod openapi;
pub mod patrons;
pub mod storage;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::AppState;

/// Build the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Shelf
        .route(
            "/items",
            get(items::list_items)
                .post(items::create_item)
                .delete(items::delete_item),
        )
        .route("/items/search", get(items::search_items))
        // Readers
        .route("/patrons", get(patrons::list_patrons).post(patrons::create_patron))
        .route("/patrons/:id", get(patrons::get_patron))
        .route("/patrons/:id/items", get(patrons::get_patron_items))
        // Loans
        .route("/loans", post(loans::create_loan))
        .route("/loans/return", post(loans::return_loan))
        // Persistence
        .route("/storage/save", post(storage::save_library))
        .route("/storage/load", post(storage::load_library))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(openapi::ApiDoc::openapi()) }),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
