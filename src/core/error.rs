use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::modules::record_store::StoreError;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    fn store_status(error: &StoreError) -> (StatusCode, String) {
        match error {
            StoreError::AuthRejected => (
                StatusCode::UNAUTHORIZED,
                "Session expired, please log in again".to_string(),
            ),
            StoreError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Access denied by record store".to_string(),
            ),
            StoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            StoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            StoreError::Rejected(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            StoreError::Network(_) | StoreError::Status { .. } | StoreError::MalformedResponse(_) => {
                tracing::error!("Record store error: {}", error);
                (
                    StatusCode::BAD_GATEWAY,
                    "Record store is unavailable".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Store(ref e) => {
                let (status, message) = Self::store_status(e);
                (status, message, None)
            }
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Auth(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_http_status() {
        let cases = [
            (StoreError::AuthRejected, StatusCode::UNAUTHORIZED),
            (StoreError::Forbidden, StatusCode::FORBIDDEN),
            (
                StoreError::Conflict("agen masih dipakai".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                StoreError::Network("connection refused".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                StoreError::MalformedResponse("expected array".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (error, expected) in cases {
            let response = AppError::from(error).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_validation_error_is_bad_request() {
        let response = AppError::Validation("phone: invalid".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
