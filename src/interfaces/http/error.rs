//! Error → HTTP response mapping
//!
//! | Error                    | Status | Body                         |
//! |--------------------------|--------|------------------------------|
//! | `DomainError::NotFound`  | 404    | plain text                   |
//! | `DomainError::Validation`| 422    | `{message, errors}`          |
//! | `DomainError::Database`  | 500    | `{message}`                  |
//! | malformed request body   | 400    | `{message}`                  |

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{DomainError, FieldError};

/// JSON error body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    /// Field path → error, present on validation failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<BTreeMap<String, FieldError>>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The request body could not be read as JSON
    #[error("{0}")]
    BadRequest(String),
}

impl From<crate::domain::ValidationFailure> for ApiError {
    fn from(failure: crate::domain::ValidationFailure) -> Self {
        Self::Domain(DomainError::Validation(failure))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain(DomainError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            ApiError::Domain(DomainError::Validation(failure)) => {
                let body = ErrorBody {
                    message: failure.to_string(),
                    errors: Some(failure.errors().clone()),
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::Domain(DomainError::Database(msg)) => {
                error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::message("Internal Server Error")),
                )
                    .into_response()
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::message(msg))).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
