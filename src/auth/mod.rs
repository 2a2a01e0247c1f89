//! Registration system
//!
//! Handles user registration, password hashing and credential storage.

pub mod credentials;
pub mod hasher;
pub mod registration;
pub mod results;

pub use credentials::{CredentialStore, MemoryCredentialStore, UserRecord};
pub use hasher::{MAX_BCRYPT_COST, MAX_PASSWORD_BYTES, MIN_BCRYPT_COST, PasswordHasher};
pub use registration::Registrar;
pub use results::Registration;
