//! Error handlers
//!
//! Maps registration errors onto HTTP status codes and JSON bodies.
//! This is the only place where the core error kinds meet HTTP.

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;

use crate::auth::hasher::MAX_PASSWORD_BYTES;
use crate::error::types::RegisterError;
use crate::protocol::responses::{
    DUPLICATE_USER_DETAIL, DetailBody, FieldViolation, INTERNAL_ERROR_DETAIL,
};

/// Error returned by HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// The registration workflow refused or failed.
    Register(RegisterError),
    /// The body parsed but failed structural validation.
    Malformed(Vec<FieldViolation>),
    /// The body could not be read at all.
    Body(BytesRejection),
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        ApiError::Register(error)
    }
}

/// Convert a registration error to its HTTP status code
pub fn error_to_status(err: &RegisterError) -> StatusCode {
    match err {
        RegisterError::DuplicateUser(_) => StatusCode::BAD_REQUEST,
        RegisterError::PasswordTooLong(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RegisterError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        RegisterError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Register(RegisterError::DuplicateUser(_)) => (
                StatusCode::BAD_REQUEST,
                Json(DetailBody {
                    detail: DUPLICATE_USER_DETAIL,
                }),
            )
                .into_response(),
            ApiError::Register(RegisterError::PasswordTooLong(_)) => {
                ApiError::Malformed(vec![FieldViolation::new(
                    &["body", "password"],
                    &format!("String should have at most {MAX_PASSWORD_BYTES} bytes"),
                    "string_too_long",
                )])
                .into_response()
            }
            ApiError::Register(err) => {
                error!("Registration failed: {}", err);
                (
                    error_to_status(&err),
                    Json(DetailBody {
                        detail: INTERNAL_ERROR_DETAIL,
                    }),
                )
                    .into_response()
            }
            ApiError::Malformed(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(DetailBody { detail: violations }),
            )
                .into_response(),
            ApiError::Body(rejection) => rejection.into_response(),
        }
    }
}
