pub mod argon2;
pub mod errors;

pub use argon2::PasswordHasher;
pub use argon2::UNUSABLE_PASSWORD_PREFIX;
pub use errors::PasswordError;
