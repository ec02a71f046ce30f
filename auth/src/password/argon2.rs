use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Prefix marking a stored hash that can never match any password.
pub const UNUSABLE_PASSWORD_PREFIX: char = '!';

const UNUSABLE_SUFFIX_LENGTH: usize = 40;
const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Build a hash value that no password will ever verify against.
    ///
    /// The random suffix keeps unusable hashes distinct from one another.
    ///
    /// # Errors
    /// * `HashingFailed` - The OS random source is unavailable
    pub fn unusable(&self) -> Result<String, PasswordError> {
        let mut bytes = [0u8; UNUSABLE_SUFFIX_LENGTH];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        let suffix: String = bytes
            .iter()
            .map(|b| ALPHANUMERIC[*b as usize % ALPHANUMERIC.len()] as char)
            .collect();

        Ok(format!("{}{}", UNUSABLE_PASSWORD_PREFIX, suffix))
    }

    /// Whether a stored hash can ever verify a password.
    pub fn is_usable(&self, hash: &str) -> bool {
        !hash.is_empty() && !hash.starts_with(UNUSABLE_PASSWORD_PREFIX)
    }

    /// Verify a password against a stored hash.
    ///
    /// Unusable hashes always yield `false` without touching Argon2.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid or verification failed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        if !self.is_usable(hash) {
            return Ok(false);
        }

        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        let argon2 = Argon2::default();

        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
