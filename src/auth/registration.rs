//! Registration workflow
//!
//! Checks the credential store for the username, hashes the password and
//! stores the new record. Transport-agnostic: errors come back as
//! [`RegisterError`] and the HTTP layer decides what they mean on the wire.

use std::sync::Arc;

use log::info;

use super::credentials::{CredentialStore, UserRecord};
use super::hasher::PasswordHasher;
use super::results::Registration;
use crate::error::RegisterError;

/// Registers new users against a shared credential store.
#[derive(Clone)]
pub struct Registrar {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
}

impl Registrar {
    pub fn new(store: Arc<dyn CredentialStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Registers `username` with `password`.
    ///
    /// Fails with [`RegisterError::DuplicateUser`] if the name is taken,
    /// including when a concurrent registration wins the insert. Nothing is
    /// stored if hashing fails.
    pub async fn register(
        &self,
        username: String,
        password: String,
    ) -> Result<Registration, RegisterError> {
        if self.store.exists(&username).await? {
            return Err(RegisterError::DuplicateUser(username));
        }

        let hashed_password = self.hasher.hash_blocking(password).await?;

        // The store re-checks under its write lock; a lost race maps to DuplicateUser.
        self.store
            .insert(UserRecord::new(username.clone(), hashed_password))
            .await?;

        info!("User registered: {}", username);

        Ok(Registration { username })
    }
}
