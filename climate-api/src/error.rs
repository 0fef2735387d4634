/// Error types for the climate API
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Client-caused failures of the date range aggregate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// A date was not a real calendar date written as YYYY-MM-DD
    #[error("Invalid date format '{0}', expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    /// Start date falls after end date
    #[error("Start date {start} is after end date {end}")]
    InvalidRange { start: String, end: String },

    /// No measurements inside the requested range
    #[error("No temperature data between {start} and {end}")]
    NoDataForRange { start: String, end: String },
}

/// Any failure a handler can return
#[derive(Error, Debug)]
pub enum ApiError {
    /// Rejected request
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Data store failure
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Range(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to the client. Store errors are not echoed.
    pub fn body(&self) -> ErrorBody {
        let error = match self {
            ApiError::Range(e) => e.to_string(),
            ApiError::Store(_) => "internal server error".to_string(),
        };
        ErrorBody { error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Range(e) => log::warn!("rejected request: {}", e),
            ApiError::Store(e) => log::error!("store failure: {:#}", e),
        }
        (self.status(), Json(self.body())).into_response()
    }
}

/// Type alias for handler results
pub type Result<T> = std::result::Result<T, ApiError>;
