//! HTTP response bodies
//!
//! Defines the JSON payloads and fixed messages returned by the API.

use serde::Serialize;

pub const REGISTERED_MESSAGE: &str = "User registered successfully";
pub const DUPLICATE_USER_DETAIL: &str = "Username already registered";
pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";
pub const ROOT_MESSAGE: &str = "Registration service is running";

/// Body of a `201 Created` registration response
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredBody {
    pub message: &'static str,
    pub username: String,
}

impl RegisteredBody {
    pub fn new(username: String) -> Self {
        Self {
            message: REGISTERED_MESSAGE,
            username,
        }
    }
}

/// Plain `{ "message": ... }` body
#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Error body, `{ "detail": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct DetailBody<T: Serialize> {
    pub detail: T,
}

/// One structural-validation failure in a request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Location of the offending value, e.g. `["body", "password"]`
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldViolation {
    pub fn new(loc: &[&str], msg: &str, kind: &'static str) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.to_string(),
            kind,
        }
    }

    /// The field name this violation refers to, if any
    pub fn field(&self) -> Option<&str> {
        self.loc.get(1).map(String::as_str)
    }
}
