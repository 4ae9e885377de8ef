use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::engine::PoolError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid prize pool: {0}")]
    InvalidPool(#[from] PoolError),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::NotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
            ),
            AppError::InvalidPool(err) => {
                log::error!("Invalid prize pool: {err}");
                (
                    actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                    "INVALID_POOL",
                    err.to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::ValidationError("bad".into()).error_response().status(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("event".into()).error_response().status(),
            actix_web::http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(PoolError::DuplicateId(1))
                .error_response()
                .status(),
            actix_web::http::StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::InternalError("boom".into()).error_response().status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
