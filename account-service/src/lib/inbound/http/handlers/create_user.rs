use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use super::null_as_empty;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserName;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<CreateUserResponseData>, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command(state.validation.password_min_length)?;

    state
        .user_service
        .create_user(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for creating a user (raw JSON)
///
/// Missing or `null` fields deserialize as empty strings so they are
/// reported as field errors alongside everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    #[serde(deserialize_with = "null_as_empty")]
    email: String,
    #[serde(deserialize_with = "null_as_empty")]
    password: String,
    #[serde(deserialize_with = "null_as_empty")]
    name: String,
}

impl CreateUserRequest {
    /// Validate every field, collecting all failures before giving up.
    fn try_into_command(self, password_min_length: usize) -> Result<CreateUserCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = EmailAddress::new(self.email)
            .map_err(|e| errors.add("email", e))
            .ok();
        let password = Password::new(self.password, password_min_length)
            .map_err(|e| errors.add("password", e))
            .ok();
        let name = UserName::new(self.name)
            .map_err(|e| errors.add("name", e))
            .ok();

        match (email, password, name) {
            (Some(email), Some(password), Some(name)) => {
                Ok(CreateUserCommand::new(email, name, Some(password)))
            }
            _ => Err(errors),
        }
    }
}

/// Created account as returned to the client. Never carries the password or its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserResponseData {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<&User> for CreateUserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            name: user.name.as_str().to_string(),
        }
    }
}
