use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::user::models::AuthToken;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token generation
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn token_for(&self, user: &User) -> Result<AuthToken, UserError> {
        if let Some(token) = self.repository.find_token_by_user(&user.id).await? {
            return Ok(token);
        }

        let token = AuthToken::new(self.authenticator.generate_token()?, user.id);

        match self.repository.create_token(token).await {
            Ok(token) => {
                tracing::info!(user_id = %user.id, "Auth token created");
                Ok(token)
            }
            Err(UserError::TokenAlreadyExists(_)) => {
                tracing::debug!(user_id = %user.id, "Concurrent login stored a token first");
                self.repository
                    .find_token_by_user(&user.id)
                    .await?
                    .ok_or_else(|| {
                        UserError::Unknown(format!("Token for user {} vanished", user.id))
                    })
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = match &command.password {
            Some(password) => self.authenticator.hash_password(password.expose())?,
            None => self.authenticator.unusable_password()?,
        };

        let user = User::new(command.email, command.name, password_hash);
        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            usable_password = self.authenticator.has_usable_password(&created_user.password_hash),
            "User created"
        );

        Ok(created_user)
    }

    async fn create_superuser(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let mut user = self.create_user(command).await?;
        user.is_staff = true;
        user.is_superuser = true;

        let superuser = self.repository.update(user).await?;
        tracing::info!(user_id = %superuser.id, "Superuser granted");

        Ok(superuser)
    }

    async fn issue_token(&self, email: &str, password: &str) -> Result<AuthToken, UserError> {
        let email = EmailAddress::normalize(email);

        let user = match self.repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                self.authenticator.equalize_timing(password);
                tracing::debug!("Token refused: no matching account");
                return Err(UserError::InvalidCredentials);
            }
        };

        if let Err(e) = self.authenticator.authenticate(password, &user.password_hash) {
            tracing::debug!(user_id = %user.id, error = %e, "Token refused: password check failed");
            return Err(e.into());
        }

        if !user.is_active {
            tracing::debug!(user_id = %user.id, "Token refused: account inactive");
            return Err(UserError::InvalidCredentials);
        }

        self.token_for(&user).await
    }
}
