use async_trait::async_trait;

use crate::domain::user::models::AuthToken;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create new user with validated fields.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email, name, and optional password
    ///
    /// # Returns
    /// Created user entity, carrying the password hash
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Normalized email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Create a user, then grant staff and superuser flags.
    ///
    /// # Errors
    /// Same as `create_user`
    async fn create_superuser(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Exchange credentials for the user's bearer token.
    ///
    /// Returns the existing token when the user already has one.
    ///
    /// # Arguments
    /// * `email` - Email as submitted; normalized before lookup
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// The token bound to the authenticated user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password, unusable password, or inactive user
    /// * `DatabaseError` - Database operation failed
    async fn issue_token(&self, email: &str, password: &str) -> Result<AuthToken, UserError>;
}

/// Persistence operations for user aggregate and its token.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// Email uniqueness is enforced by the store itself.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by normalized email address.
    ///
    /// # Arguments
    /// * `email` - Normalized email address string
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Arguments
    /// * `user` - User entity with updated fields
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Retrieve the token bound to a user.
    ///
    /// # Returns
    /// Optional token (None if the user never logged in)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_token_by_user(&self, user_id: &UserId) -> Result<Option<AuthToken>, UserError>;

    /// Persist a token for a user that has none.
    ///
    /// # Errors
    /// * `TokenAlreadyExists` - The user already has a token
    /// * `DatabaseError` - Database operation failed
    async fn create_token(&self, token: AuthToken) -> Result<AuthToken, UserError>;
}
