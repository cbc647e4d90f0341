//! Error types for the lending ledger

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Numeric error codes reported alongside every error response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    NoSuchUser = 4,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    Duplicate = 8,
    ItemNotHeld = 12,
    BadValue = 18,
    NoSuchData = 20,
    IoFailure = 21,
}

/// Main application error type
///
/// Every variant is a distinct kind so callers can branch on it; none of them
/// is retried automatically.
#[derive(Error, Debug)]
pub enum AppError {
    /// `remove_item` on an entry absent from the shelf
    #[error("Book not found in the library: {0}")]
    NotFound(String),

    /// `register_patron` with a colliding id
    #[error("A reader with ID {0} is already registered")]
    DuplicateId(i32),

    #[error("No reader registered with ID {0}")]
    PatronNotFound(i32),

    /// `lend_item` when no shelved entry carries the title
    #[error("Book \"{0}\" is not available for lending")]
    ItemUnavailable(String),

    /// `return_item` when the patron holds no entry with the title
    #[error("Reader {patron_id} does not hold \"{title}\"")]
    ItemNotHeld { patron_id: i32, title: String },

    /// `Patron::release` on an identity the patron does not hold
    #[error("Reader has not borrowed {0}")]
    NotHeld(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Malformed library file: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Numeric code for this error kind
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NoSuchItem,
            AppError::DuplicateId(_) => ErrorCode::Duplicate,
            AppError::PatronNotFound(_) => ErrorCode::NoSuchUser,
            AppError::ItemUnavailable(_) => ErrorCode::ItemNotAvailable,
            AppError::ItemNotHeld { .. } | AppError::NotHeld(_) => ErrorCode::ItemNotHeld,
            AppError::FileNotFound(_) | AppError::ParseError(_) => ErrorCode::NoSuchData,
            AppError::Validation(_) | AppError::BadRequest(_) => ErrorCode::BadValue,
            AppError::Io(_) => ErrorCode::IoFailure,
        }
    }

    /// HTTP status used when the error crosses the API boundary
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::PatronNotFound(_) | AppError::FileNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::DuplicateId(_) | AppError::ItemUnavailable(_) => StatusCode::CONFLICT,
            AppError::ItemNotHeld { .. } | AppError::NotHeld(_) | AppError::ParseError(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match &self {
            AppError::Io(e) => {
                tracing::error!("I/O error: {:?}", e);
                "Storage failure".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
