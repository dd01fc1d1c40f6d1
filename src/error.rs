use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::catalog::LoadError;

/// Message shown for any failure whose cause must stay server-side
const SYSTEM_ERROR_MESSAGE: &str = "Something went wrong while generating recommendations";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Empty query: a title is required")]
    EmptyQuery,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Title not found: {0}")]
    NotFound(String),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(#[from] Arc<LoadError>),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::EmptyQuery | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CatalogUnavailable(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text safe to show the end user
    pub fn user_message(&self) -> String {
        match self {
            AppError::EmptyQuery => "Please enter a movie or show title".to_string(),
            AppError::InvalidRequest(msg) => msg.clone(),
            AppError::NotFound(query) => {
                format!("No movie or show matching '{}' was found", query)
            }
            AppError::CatalogUnavailable(_) | AppError::Internal(_) => {
                SYSTEM_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.user_message()
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_carries_query() {
        let err = AppError::NotFound("Strangr Thngs".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.user_message().contains("Strangr Thngs"));
    }

    #[test]
    fn test_empty_query_is_bad_request() {
        assert_eq!(AppError::EmptyQuery.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_request_is_bad_request_with_message() {
        let err = AppError::InvalidRequest(
            "Expected request with `Content-Type: application/json`".to_string(),
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.user_message().contains("Content-Type"));
    }

    #[test]
    fn test_system_errors_hide_cause() {
        let err = AppError::from(Arc::new(LoadError::DimensionMismatch {
            matrix: 2,
            catalog: 3,
        }));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), SYSTEM_ERROR_MESSAGE);
        assert!(err.to_string().contains("dimension 2"));
    }
}
