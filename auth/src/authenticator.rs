use std::sync::OnceLock;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenError;
use crate::token::TokenGenerator;

/// Authentication coordinator combining password verification and token generation.
///
/// Holds no key material: tokens are opaque and only meaningful once stored
/// against a user by the caller.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_generator: TokenGenerator,
    /// Hash verified against when no account matches, built on first use.
    decoy_hash: OnceLock<Option<String>>,
}

const DECOY_PASSWORD: &str = "decoy-password-never-stored";

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),
}

impl Authenticator {
    /// Create a new authenticator with default-length tokens.
    pub fn new() -> Self {
        Self::with_token_generator(TokenGenerator::new())
    }

    /// Create an authenticator with a custom token generator.
    pub fn with_token_generator(token_generator: TokenGenerator) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_generator,
            decoy_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Hashed password string
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Produce a stored hash for an account that must not log in with a password.
    pub fn unusable_password(&self) -> Result<String, PasswordError> {
        self.password_hasher.unusable()
    }

    /// Whether a stored hash can verify any password at all.
    pub fn has_usable_password(&self, stored_hash: &str) -> bool {
        self.password_hasher.is_usable(stored_hash)
    }

    /// Verify a password against its stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match, or the hash is unusable
    /// * `PasswordError` - Stored hash is malformed
    pub fn authenticate(&self, password: &str, stored_hash: &str) -> Result<(), AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(())
    }

    /// Run a full verification against a decoy hash and discard the result.
    ///
    /// Called when no account matches so that response time does not reveal
    /// whether an email is registered.
    pub fn equalize_timing(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).ok());

        match decoy {
            Some(hash) => {
                let _ = self.password_hasher.verify(password, hash);
            }
            None => {
                let _ = self.password_hasher.hash(password);
            }
        }
    }

    /// Generate a new opaque token.
    ///
    /// # Errors
    /// * `TokenError` - Random source unavailable
    pub fn generate_token(&self) -> Result<String, TokenError> {
        self.token_generator.generate()
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new()
    }
}
