//! Error types
//!
//! Defines domain-specific error types for each module of the registration service.

use std::io;

/// Password hashing errors
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// The bcrypt primitive rejected the input or the stored hash.
    #[error("bcrypt failure: {0}")]
    Bcrypt(bcrypt::BcryptError),

    /// The password exceeds bcrypt's input and would be truncated.
    #[error("password is {0} bytes, longer than bcrypt accepts")]
    PasswordTooLong(usize),

    /// The blocking hashing task panicked or was cancelled.
    #[error("hashing task failed: {0}")]
    TaskFailed(String),
}

impl From<bcrypt::BcryptError> for HashError {
    fn from(error: bcrypt::BcryptError) -> Self {
        match error {
            bcrypt::BcryptError::Truncation(len) => HashError::PasswordTooLong(len),
            other => HashError::Bcrypt(other),
        }
    }
}

/// Credential store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record for this username is already present.
    #[error("user already exists: {0}")]
    AlreadyExists(String),

    /// Backing store failure (database, network, etc.).
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a backend error from any error type.
    #[inline]
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Registration workflow errors
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("username already registered: {0}")]
    DuplicateUser(String),

    #[error("password is {0} bytes, longer than bcrypt accepts")]
    PasswordTooLong(usize),

    #[error("password hashing failed: {0}")]
    Hashing(HashError),

    #[error("credential store failed: {0}")]
    Store(StoreError),
}

impl From<HashError> for RegisterError {
    fn from(error: HashError) -> Self {
        match error {
            HashError::PasswordTooLong(len) => RegisterError::PasswordTooLong(len),
            other => RegisterError::Hashing(other),
        }
    }
}

impl From<StoreError> for RegisterError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::AlreadyExists(username) => RegisterError::DuplicateUser(username),
            other => RegisterError::Store(other),
        }
    }
}

/// Server bootstrap errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
