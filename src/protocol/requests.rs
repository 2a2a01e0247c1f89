//! Request parsing
//!
//! Structural validation of the registration body: both fields must be
//! present and be strings. Nothing beyond shape and type is checked here,
//! apart from the username being non-empty since it is the store key.

use std::fmt;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::protocol::responses::FieldViolation;

/// A structurally valid `POST /register` body
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl RegisterRequest {
    /// Parses and validates a raw JSON body, collecting every violation.
    pub fn from_slice(body: &[u8]) -> Result<Self, Vec<FieldViolation>> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            vec![FieldViolation::new(
                &["body"],
                &format!("JSON decode error: {e}"),
                "json_invalid",
            )]
        })?;

        let Value::Object(map) = value else {
            return Err(vec![FieldViolation::new(
                &["body"],
                "Input should be a valid object",
                "model_type",
            )]);
        };

        let mut violations = Vec::new();
        let username = string_field(&map, "username", &mut violations);
        let password = string_field(&map, "password", &mut violations);

        let (Some(username), Some(password)) = (username, password) else {
            return Err(violations);
        };

        if username.is_empty() {
            return Err(vec![FieldViolation::new(
                &["body", "username"],
                "String should have at least 1 character",
                "string_too_short",
            )]);
        }

        Ok(Self { username, password })
    }
}

fn string_field(
    map: &Map<String, Value>,
    name: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match map.get(name) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(FieldViolation::new(
                &["body", name],
                "Input should be a valid string",
                "string_type",
            ));
            None
        }
        None => {
            violations.push(FieldViolation::new(
                &["body", name],
                "Field required",
                "missing",
            ));
            None
        }
    }
}

impl<S> FromRequest<S> for RegisterRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(ApiError::Body)?;
        Self::from_slice(&body).map_err(ApiError::Malformed)
    }
}
