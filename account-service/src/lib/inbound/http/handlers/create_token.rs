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
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;

pub async fn create_token(
    State(state): State<AppState>,
    body: Result<Json<CreateTokenRequest>, JsonRejection>,
) -> Result<ApiSuccess<CreateTokenResponseData>, ApiError> {
    let Json(body) = body?;
    body.check_present()?;

    let token = state
        .user_service
        .issue_token(&body.email, &body.password)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        CreateTokenResponseData { token: token.key },
    ))
}

/// HTTP request body for exchanging credentials for a token (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateTokenRequest {
    #[serde(deserialize_with = "null_as_empty")]
    email: String,
    #[serde(deserialize_with = "null_as_empty")]
    password: String,
}

impl CreateTokenRequest {
    /// Reject blank fields without touching the store.
    ///
    /// Only presence is checked here: a malformed email is indistinguishable
    /// from an unknown one.
    fn check_present(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.email.trim().is_empty() {
            errors.add("email", EmailError::Empty);
        }
        if self.password.is_empty() {
            errors.add("password", PasswordPolicyError::Blank);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTokenResponseData {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> CreateTokenRequest {
        CreateTokenRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_present_fields_pass() {
        assert!(request("testapiuser@test.com", "Test123")
            .check_present()
            .is_ok());
    }

    #[test]
    fn test_empty_email_rejected() {
        assert_eq!(
            request("", "Test123").check_present(),
            Err(FieldErrors::single("email", "This field may not be blank."))
        );
        assert!(request("   ", "Test123").check_present().is_err());
    }

    #[test]
    fn test_empty_password_rejected() {
        assert_eq!(
            request("testapiuser@test.com", "").check_present(),
            Err(FieldErrors::single(
                "password",
                "This field may not be blank."
            ))
        );
    }
}
