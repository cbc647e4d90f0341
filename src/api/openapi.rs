//! OpenAPI documentation

use utoipa::OpenApi;

use crate::api::{health, items, loans, patrons, storage};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lending Ledger API",
        version = "1.0.0",
        description = "Library catalog, readers and loans"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        health::health_check,
        // Shelf
        items::list_items,
        items::search_items,
        items::create_item,
        items::delete_item,
        // Readers
        patrons::list_patrons,
        patrons::create_patron,
        patrons::get_patron,
        patrons::get_patron_items,
        // Loans
        loans::create_loan,
        loans::return_loan,
        // Persistence
        storage::save_library,
        storage::load_library,
    ),
    components(
        schemas(
            crate::models::item::CatalogEntry,
            crate::models::item::NewEntry,
            crate::models::item::EntryIdentity,
            crate::models::item::EntryQuery,
            items::SearchResponse,
            crate::models::patron::Patron,
            crate::models::patron::NewPatron,
            crate::models::loan::LoanRequest,
            crate::models::loan::LoanReceipt,
            crate::models::loan::LoanStatus,
            storage::StorageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "items", description = "Shelf management"),
        (name = "patrons", description = "Reader registration"),
        (name = "loans", description = "Lending and returns"),
        (name = "storage", description = "Saving and loading the library file")
    )
)]
pub struct ApiDoc;
