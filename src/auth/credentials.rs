//! Credential storage and management
//!
//! Holds registered users and their password hashes. The store is injected
//! into the registrar as a trait object so a persistent backend can replace
//! the in-memory one without touching registration logic.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// A registered user. The hash is opaque and never leaves the store layer.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub hashed_password: String,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, hashed_password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            hashed_password: hashed_password.into(),
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("hashed_password", &"<redacted>")
            .finish()
    }
}

/// Trait for credential stores.
///
/// Implementations must be thread-safe (`Send + Sync`) as they are shared by
/// concurrent request handlers. `insert` must be an atomic insert-if-absent:
/// at most one record per username may ever exist.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Check whether a username is registered.
    async fn exists(&self, username: &str) -> Result<bool, StoreError>;

    /// Insert a new record.
    ///
    /// # Returns
    /// * `Ok(())` - Record stored
    /// * `Err(StoreError::AlreadyExists)` - Username taken, store unchanged
    async fn insert(&self, record: UserRecord) -> Result<(), StoreError>;

    /// Look up a record by username.
    async fn get(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Number of registered users.
    async fn len(&self) -> Result<usize, StoreError>;
}

/// Blanket implementation for `Arc<S>` where `S: CredentialStore`.
#[async_trait]
impl<S: CredentialStore + ?Sized> CredentialStore for Arc<S> {
    #[inline]
    async fn exists(&self, username: &str) -> Result<bool, StoreError> {
        (**self).exists(username).await
    }

    #[inline]
    async fn insert(&self, record: UserRecord) -> Result<(), StoreError> {
        (**self).insert(record).await
    }

    #[inline]
    async fn get(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        (**self).get(username).await
    }

    #[inline]
    async fn len(&self) -> Result<usize, StoreError> {
        (**self).len().await
    }
}

/// Blanket implementation for `Box<S>` where `S: CredentialStore`.
#[async_trait]
impl<S: CredentialStore + ?Sized> CredentialStore for Box<S> {
    #[inline]
    async fn exists(&self, username: &str) -> Result<bool, StoreError> {
        (**self).exists(username).await
    }

    #[inline]
    async fn insert(&self, record: UserRecord) -> Result<(), StoreError> {
        (**self).insert(record).await
    }

    #[inline]
    async fn get(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        (**self).get(username).await
    }

    #[inline]
    async fn len(&self) -> Result<usize, StoreError> {
        (**self).len().await
    }
}

/// Process-lifetime credential store backed by a locked hash map.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.users.read().await.contains_key(username))
    }

    async fn insert(&self, record: UserRecord) -> Result<(), StoreError> {
        // Check and insert under one write guard.
        let mut users = self.users.write().await;
        match users.entry(record.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(record.username)),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn get(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.users.read().await.len())
    }
}
