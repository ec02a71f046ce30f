use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

use super::errors::TokenError;

/// Opaque bearer token generator.
///
/// Tokens are random bytes from the OS CSPRNG, hex encoded. They carry no
/// structure and can only be checked by looking them up in storage.
pub struct TokenGenerator {
    byte_length: usize,
}

impl TokenGenerator {
    /// 20 random bytes, i.e. 40 hex characters.
    pub const DEFAULT_BYTE_LENGTH: usize = 20;

    /// Create a generator producing tokens of the default length.
    pub fn new() -> Self {
        Self::with_byte_length(Self::DEFAULT_BYTE_LENGTH)
    }

    /// Create a generator producing `byte_length` random bytes per token.
    ///
    /// The encoded token is twice as many characters long.
    pub fn with_byte_length(byte_length: usize) -> Self {
        Self { byte_length }
    }

    /// Generate a fresh token.
    ///
    /// # Returns
    /// Lowercase hex string of `2 * byte_length` characters
    ///
    /// # Errors
    /// * `GenerationFailed` - The OS random source is unavailable
    pub fn generate(&self) -> Result<String, TokenError> {
        let mut bytes = vec![0u8; self.byte_length];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenError::GenerationFailed(e.to_string()))?;

        Ok(hex::encode(bytes))
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}
