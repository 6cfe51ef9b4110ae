//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use vokabel_core::ScheduleError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Unauthorized: token expired")]
    TokenExpired,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Partial delete: {0}")]
    PartialDelete(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body, `{ "error": <message> }` on the wire.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) | ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            // Day-set preconditions are client-fixable configuration; a
            // missing stage row is a broken reference table.
            ApiError::Schedule(ScheduleError::NoLearnDays)
            | ApiError::Schedule(ScheduleError::NoReviewDays) => StatusCode::BAD_REQUEST,
            ApiError::Schedule(ScheduleError::StageNotFound(_))
            | ApiError::Database(_)
            | ApiError::Migration(_)
            | ApiError::Storage(_)
            | ApiError::Upstream(_)
            | ApiError::PartialDelete(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_status() {
        let error = ApiError::Unauthorized("Unauthorized".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_token_expired_status_and_message() {
        let error = ApiError::TokenExpired;
        assert_eq!(error.to_string(), "Unauthorized: token expired");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_not_found_status() {
        let error = ApiError::NotFound("vocabulary 123".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_no_review_days_is_bad_request() {
        let error = ApiError::Schedule(ScheduleError::NoReviewDays);
        assert_eq!(error.to_string(), "There are no Review Days");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_no_learn_days_is_bad_request() {
        let error = ApiError::Schedule(ScheduleError::NoLearnDays);
        assert_eq!(error.to_string(), "There are no Learn Days");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_stage_is_internal() {
        let error = ApiError::Schedule(ScheduleError::StageNotFound(7));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_partial_delete_status() {
        let error = ApiError::PartialDelete("audio object 4.mp3 left behind".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display_unauthorized_is_verbatim() {
        let error = ApiError::Unauthorized("Invalid or missing token".to_string());
        assert_eq!(error.to_string(), "Invalid or missing token");
    }
}
