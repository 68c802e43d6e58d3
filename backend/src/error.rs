//! Failure modes of the inventory and their HTTP mapping.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::{AssetCategory, KeyStatus};

#[derive(Error, Debug, PartialEq)]
pub enum InventoryError {
    #[error("Asset not found")]
    AssetNotFound(String),

    #[error("Key not found")]
    KeyNotFound(String),

    #[error("User not found")]
    UserNotFound(String),

    /// A required field was blank or missing.
    #[error("{0} is required")]
    Validation(&'static str),

    #[error("Key {id} cannot be {action} while {status}")]
    InvalidTransition {
        id: String,
        action: &'static str,
        status: KeyStatus,
    },

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("Deleting {0} cannot be undone; repeat the request with confirm=true")]
    ConfirmationRequired(String),

    /// A replacement dropped or rewrote entries of a record's history.
    #[error("History of {0} is append-only")]
    HistoryRewritten(String),

    #[error("Asset {id} is not a {expected} asset")]
    CategoryMismatch { id: String, expected: AssetCategory },

    #[error("Inventory state is unavailable")]
    Unavailable,
}

pub type Result<T> = std::result::Result<T, InventoryError>;

impl InventoryError {
    pub fn invalid_transition(id: &str, action: &'static str, status: KeyStatus) -> Self {
        InventoryError::InvalidTransition {
            id: id.to_string(),
            action,
            status,
        }
    }
}

impl ResponseError for InventoryError {
    fn status_code(&self) -> StatusCode {
        match self {
            InventoryError::AssetNotFound(_)
            | InventoryError::KeyNotFound(_)
            | InventoryError::UserNotFound(_) => StatusCode::NOT_FOUND,
            InventoryError::Validation(_)
            | InventoryError::ConfirmationRequired(_)
            | InventoryError::CategoryMismatch { .. } => StatusCode::BAD_REQUEST,
            InventoryError::InvalidTransition { .. } | InventoryError::HistoryRewritten(_) => {
                StatusCode::CONFLICT
            }
            InventoryError::Forbidden(_) => StatusCode::FORBIDDEN,
            InventoryError::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_string())
    }
}
