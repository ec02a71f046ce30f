use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::user::errors::UserError;

pub mod create_token;
pub mod create_user;

/// Key under which errors not tied to a single request field are reported.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Message for every failed credential exchange, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Unable to authenticate with provided credentials.";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Validation messages keyed by request field name.
///
/// Serializes as `{"email": ["..."], "password": ["..."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl ToString) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl ToString) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(FieldErrors),
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::BadRequest(errors)
    }
}

/// Unreadable bodies (not JSON, wrong content type, wrong field types) are
/// reported like any other validation failure.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "Rejected request body");
        FieldErrors::single(NON_FIELD_ERRORS, rejection.body_text()).into()
    }
}

/// Deserialize an explicit JSON `null` the same way as a missing field.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorData {
                        detail: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidEmail(e) => FieldErrors::single("email", e).into(),
            UserError::EmailAlreadyExists(_) => {
                FieldErrors::single("email", "user with this email already exists.").into()
            }
            UserError::InvalidPassword(e) => FieldErrors::single("password", e).into(),
            UserError::InvalidName(e) => FieldErrors::single("name", e).into(),
            UserError::InvalidCredentials => {
                FieldErrors::single(NON_FIELD_ERRORS, INVALID_CREDENTIALS_MESSAGE).into()
            }
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::NotFound(_)
            | UserError::TokenAlreadyExists(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub detail: String,
}
