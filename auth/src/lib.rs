//! Authentication utilities library
//!
//! Provides reusable credential infrastructure for services:
//! - Password hashing (Argon2id) and unusable-password markers
//! - Opaque bearer token generation
//! - Authentication coordination
//!
//! Storage of hashes and tokens is left to the service, which decides how a
//! token is bound to an account.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//!
//! let disabled = hasher.unusable().unwrap();
//! assert!(!hasher.verify("my_password", &disabled).unwrap());
//! ```
//!
//! ## Opaque Tokens
//! ```
//! use auth::TokenGenerator;
//!
//! let token = TokenGenerator::new().generate().unwrap();
//! assert_eq!(token.len(), 40);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify, then hand out a token
//! auth.authenticate("password123", &hash).unwrap();
//! let token = auth.generate_token().unwrap();
//! println!("Token: {}", token);
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::UNUSABLE_PASSWORD_PREFIX;
pub use token::TokenError;
pub use token::TokenGenerator;
