//! HTTP error types and status mappings.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use staticfind_core::StorageError;
use thiserror::Error;

/// Errors a serving handler can produce.
///
/// A missing asset is a normal outcome of the finder chain; it becomes
/// `NotFound` here, everything unexpected becomes `Internal`.
#[derive(Debug, Error)]
pub enum HttpError {
    /// No finder produced a match, or the match vanished before serving.
    #[error("{0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match &self {
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

impl From<StorageError> for HttpError {
    fn from(err: StorageError) -> Self {
        HttpError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = HttpError::NotFound("\"x\" could not be found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
