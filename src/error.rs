use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid FIT: {0}")]
    InvalidFit(String),
    #[error("Invalid gzip stream: {0}")]
    InvalidGzip(String),
    #[error("Invalid zip archive: {0}")]
    InvalidZip(String),
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// The recorded sport could not be mapped onto a category. Carries the
/// offending sport metadata.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("More than one sport (except cycling) in file: {0}")]
    MultipleSports(String),
    #[error("Unknown sub_sport of cycling: {0}")]
    UnknownCyclingSubSport(String),
    #[error("Unsupported swimming (not pool or open_water): {0}")]
    AmbiguousSwim(String),
    #[error("Unsupported sport: {0}")]
    UnsupportedSport(String),
    #[error("Sport not specified")]
    SportNotSpecified,
}

#[derive(Debug, thiserror::Error)]
pub enum FileRejected {
    #[error("No samples with a timestamp")]
    NoSamples,
    #[error("Minimum timestamp is the epoch zero value")]
    ZeroTimestamp,
}

#[derive(Debug, thiserror::Error)]
#[error("Unsupported sport category: {0}")]
pub struct UnsupportedCategoryError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Batch for {table} is missing key column {column}")]
    MissingKey { table: String, column: &'static str },
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        PersistenceError::Database(err.to_string())
    }
}

/// Everything that can go wrong for a single file. Caught at the batch level.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
    #[error(transparent)]
    Rejected(#[from] FileRejected),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Problems that stop a whole upload before any file is processed.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    UnsupportedCategory(#[from] UnsupportedCategoryError),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    UnsupportedCategory(#[from] UnsupportedCategoryError),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<BatchError> for AppError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::Decode(e) => AppError::Decode(e),
            BatchError::UnsupportedCategory(e) => AppError::UnsupportedCategory(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Decode(_) | AppError::UnsupportedCategory(_) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
