//! HTTP protocol layer
//!
//! Request extraction and response payloads for the registration API.

pub mod requests;
pub mod responses;

pub use requests::RegisterRequest;
pub use responses::{FieldViolation, RegisteredBody};
