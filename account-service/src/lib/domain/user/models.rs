use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use email_address::Options;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;

/// User aggregate entity.
///
/// Represents a registered account, identified by its normalized email.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: UserName,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a regular, active account from validated fields and a prepared hash.
    pub fn new(email: EmailAddress, name: UserName, password_hash: String) -> Self {
        Self {
            id: UserId::new(),
            email,
            name,
            password_hash,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            created_at: Utc::now(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 parser and stored normalized: the domain part
/// is lower-cased, the local part is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 255;

    /// Create a new validated, normalized email address.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `Empty` - Email is empty or whitespace
    /// * `TooLong` - Email longer than 255 characters
    /// * `InvalidFormat` - Not a bare `local@domain.tld` address
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        // Bare `local@domain.tld` only, the stored string is the unique key.
        let options = Options::default()
            .without_display_text()
            .without_domain_literal()
            .with_required_tld();

        email_address::EmailAddress::parse_with_options(email, options)
            .map(|_| EmailAddress(Self::normalize(email)))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Lower-case the domain part of an address without validating it.
    ///
    /// Used for lookups, where an unparseable address simply matches nothing.
    pub fn normalize(email: &str) -> String {
        let email = email.trim();
        match email.rsplit_once('@') {
            Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
            None => email.to_string(),
        }
    }

    /// Get email as string slice.
    ///
    /// # Returns
    /// Email string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name, free text up to 255 characters. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    const MAX_LENGTH: usize = 255;

    pub fn new(name: String) -> Result<Self, NameError> {
        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password that passed the length policy.
///
/// Only ever handed to the hasher; `Debug` never prints the value.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Minimum length used when no configuration overrides it.
    pub const DEFAULT_MIN_LENGTH: usize = 5;

    /// Check a raw password against the policy.
    ///
    /// # Arguments
    /// * `password` - Raw password, kept exactly as given
    /// * `min_length` - Minimum number of characters
    ///
    /// # Errors
    /// * `Blank` - Empty or whitespace only
    /// * `TooShort` - Fewer than `min_length` characters
    pub fn new(password: String, min_length: usize) -> Result<Self, PasswordPolicyError> {
        if password.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }

        let length = password.chars().count();
        if length < min_length {
            return Err(PasswordPolicyError::TooShort {
                min: min_length,
                actual: length,
            });
        }

        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(********)")
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub email: EmailAddress,
    pub name: UserName,
    /// `None` creates an account that cannot log in with a password.
    pub password: Option<Password>,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `name` - Validated display name
    /// * `password` - Policy-checked password (will be hashed by service)
    ///
    /// # Returns
    /// CreateUserCommand with validated fields
    pub fn new(email: EmailAddress, name: UserName, password: Option<Password>) -> Self {
        Self {
            email,
            name,
            password,
        }
    }
}

/// Opaque bearer token bound to exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub key: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn new(key: String, user_id: UserId) -> Self {
        Self {
            key,
            user_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_domain_is_lowercased() {
        let email = EmailAddress::new("test@SAMPLE.COM".to_string()).unwrap();
        assert_eq!(email.as_str(), "test@sample.com");
    }

    #[test]
    fn test_email_local_part_is_preserved() {
        let email = EmailAddress::new("  Test.User@Sample.Com ".to_string()).unwrap();
        assert_eq!(email.as_str(), "Test.User@sample.com");
    }

    #[test]
    fn test_email_empty() {
        assert_eq!(EmailAddress::new(String::new()), Err(EmailError::Empty));
        assert_eq!(EmailAddress::new("   ".to_string()), Err(EmailError::Empty));
    }

    #[test]
    fn test_email_invalid_format() {
        let result = EmailAddress::new("not-an-email".to_string());
        assert!(matches!(result, Err(EmailError::InvalidFormat(_))));
    }

    #[test]
    fn test_email_display_text_rejected() {
        for raw in [
            "Evil Name <evil@Test.COM>",
            "Other <evil@test.com>",
            "<evil@test.com>",
        ] {
            let result = EmailAddress::new(raw.to_string());
            assert!(
                matches!(result, Err(EmailError::InvalidFormat(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_email_domain_without_tld_rejected() {
        assert!(matches!(
            EmailAddress::new("a@b".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
        assert!(matches!(
            EmailAddress::new("user@[127.0.0.1]".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
        assert!(EmailAddress::new("a@b.co".to_string()).is_ok());
    }

    #[test]
    fn test_email_too_long() {
        let email = format!("{}@test.com", "a".repeat(250));
        let result = EmailAddress::new(email);
        assert!(matches!(result, Err(EmailError::TooLong { max: 255, .. })));
    }

    #[test]
    fn test_normalize_without_at_sign() {
        assert_eq!(EmailAddress::normalize("NoDomain"), "NoDomain");
        assert_eq!(EmailAddress::normalize("a@b@EXAMPLE.com"), "a@b@example.com");
    }

    #[test]
    fn test_password_length_boundary() {
        assert_eq!(
            Password::new("pw".to_string(), 5).unwrap_err(),
            PasswordPolicyError::TooShort { min: 5, actual: 2 }
        );
        assert!(Password::new("four".to_string(), 5).is_err());
        assert!(Password::new("fives".to_string(), 5).is_ok());
        assert!(Password::new("Test123".to_string(), 5).is_ok());
        assert!(Password::new("fives".to_string(), 6).is_err());
    }

    #[test]
    fn test_password_blank() {
        assert_eq!(
            Password::new(String::new(), 5).unwrap_err(),
            PasswordPolicyError::Blank
        );
        assert_eq!(
            Password::new("       ".to_string(), 5).unwrap_err(),
            PasswordPolicyError::Blank
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("Test123".to_string(), 5).unwrap();
        assert!(!format!("{:?}", password).contains("Test123"));
        assert_eq!(password.expose(), "Test123");
    }

    #[test]
    fn test_name_length() {
        assert!(UserName::new(String::new()).is_ok());
        assert!(UserName::new("n".repeat(255)).is_ok());
        assert!(matches!(
            UserName::new("n".repeat(256)),
            Err(NameError::TooLong { max: 255, actual: 256 })
        ));
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            EmailAddress::new("test@sample.com".to_string()).unwrap(),
            UserName::default(),
            "hash".to_string(),
        );

        assert!(user.is_active);
        assert!(!user.is_staff);
        assert!(!user.is_superuser);
    }
}
