//! Lending endpoints
//!
//! Each request holds the ledger lock for the whole shelf/reader move.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::loan::{LoanReceipt, LoanRequest, LoanStatus},
};

/// Lend the first shelved entry with the title to a reader
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 201, description = "Entry lent", body = LoanReceipt),
        (status = 404, description = "Reader not found"),
        (status = 409, description = "No shelved entry with this title")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<(StatusCode, Json<LoanReceipt>)> {
    let entry = state
        .ledger
        .lock()
        .await
        .lend_item(request.patron_id, &request.title)?;

    Ok((
        StatusCode::CREATED,
        Json(LoanReceipt {
            patron_id: request.patron_id,
            entry,
            status: LoanStatus::Lent,
        }),
    ))
}

/// Return the first held entry with the title to the shelf
#[utoipa::path(
    post,
    path = "/loans/return",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Entry returned", body = LoanReceipt),
        (status = 404, description = "Reader not found"),
        (status = 422, description = "Reader does not hold this title")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<Json<LoanReceipt>> {
    let entry = state
        .ledger
        .lock()
        .await
        .return_item(request.patron_id, &request.title)?;

    Ok(Json(LoanReceipt {
        patron_id: request.patron_id,
        entry,
        status: LoanStatus::Returned,
    }))
}
