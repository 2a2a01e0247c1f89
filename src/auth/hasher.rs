//! Password hashing utilities.

use bcrypt::BcryptError;

use crate::error::HashError;

/// Lowest bcrypt work factor the algorithm accepts.
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest bcrypt work factor the algorithm accepts.
pub const MAX_BCRYPT_COST: u32 = 31;
/// Longest password bcrypt hashes without truncation. Its 72-byte input
/// includes a trailing NUL.
pub const MAX_PASSWORD_BYTES: usize = 71;

/// Salted bcrypt hashing with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost.
    #[inline]
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt.
    ///
    /// Two calls with the same password return different strings; both
    /// verify against it. Passwords longer than [`MAX_PASSWORD_BYTES`] are
    /// refused rather than silently truncated.
    ///
    /// # Example
    /// ```
    /// use rax_register::auth::PasswordHasher;
    ///
    /// let hasher = PasswordHasher::new(4);
    /// let hash = hasher.hash("hunter2").unwrap();
    /// assert!(hasher.verify("hunter2", &hash).unwrap());
    /// ```
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        bcrypt::non_truncating_hash(password, self.cost).map_err(HashError::from)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// A candidate longer than [`MAX_PASSWORD_BYTES`] can never match a
    /// stored hash and yields `Ok(false)`. Returns `Err` only when the hash
    /// itself is unusable.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        match bcrypt::non_truncating_verify(password, hash) {
            Ok(matched) => Ok(matched),
            Err(BcryptError::Truncation(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Hash on the blocking thread pool so request tasks are not stalled.
    pub async fn hash_blocking(&self, password: String) -> Result<String, HashError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| HashError::TaskFailed(e.to_string()))?
    }
}
