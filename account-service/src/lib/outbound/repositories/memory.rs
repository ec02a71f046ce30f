use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::AuthToken;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    ids_by_email: HashMap<String, UserId>,
    tokens: HashMap<UserId, AuthToken>,
}

/// Process-local store used when no database is configured.
///
/// Every write holds the lock for its whole check-and-insert, which gives
/// the same uniqueness guarantees as the Postgres constraints.
#[derive(Default)]
pub struct InMemoryUserRepository {
    tables: RwLock<Tables>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.tables.write().await;

        if tables.ids_by_email.contains_key(user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        tables
            .ids_by_email
            .insert(user.email.as_str().to_string(), user.id);
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let tables = self.tables.read().await;

        Ok(tables
            .ids_by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.tables.write().await;

        let previous_email = match tables.users.get(&user.id) {
            Some(existing) => existing.email.as_str().to_string(),
            None => return Err(UserError::NotFound(user.id.to_string())),
        };

        if previous_email != user.email.as_str() {
            if tables.ids_by_email.contains_key(user.email.as_str()) {
                return Err(UserError::EmailAlreadyExists(
                    user.email.as_str().to_string(),
                ));
            }
            tables.ids_by_email.remove(&previous_email);
            tables
                .ids_by_email
                .insert(user.email.as_str().to_string(), user.id);
        }

        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_token_by_user(&self, user_id: &UserId) -> Result<Option<AuthToken>, UserError> {
        Ok(self.tables.read().await.tokens.get(user_id).cloned())
    }

    async fn create_token(&self, token: AuthToken) -> Result<AuthToken, UserError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&token.user_id) {
            return Err(UserError::NotFound(token.user_id.to_string()));
        }
        if tables.tokens.contains_key(&token.user_id) {
            return Err(UserError::TokenAlreadyExists(token.user_id.to_string()));
        }

        tables.tokens.insert(token.user_id, token.clone());

        Ok(token)
    }
}
