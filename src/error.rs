use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::error::EncodeError),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bincode::error::DecodeError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Username already taken")]
    UserAlreadyExists,

    #[error("ID not found")]
    UserNotFound,

    #[error("{0}")]
    InvalidInput(String),
}

impl AppError {
    /// True for failures of the underlying store or runtime rather than of the request
    pub fn is_internal(&self) -> bool {
        !matches!(
            self,
            AppError::UserAlreadyExists | AppError::UserNotFound | AppError::InvalidInput(_)
        )
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::UserAlreadyExists => StatusCode::CONFLICT,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Every error leaves the server as `{"error": message}`.
/// Store failures are logged in full and masked for the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_message = if self.is_internal() {
            tracing::error!("{:?}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
