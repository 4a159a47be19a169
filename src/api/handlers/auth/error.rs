//! Request-level errors and their HTTP rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::types::MessageResponse;

pub(super) const USERNAME_TAKEN: &str = "Username already exists!";
pub(super) const EMAIL_TAKEN: &str = "Email already exists!";
pub(super) const ACCOUNT_TAKEN: &str = "Username or email already exists!";
pub(super) const INVALID_CREDENTIALS: &str = "Invalid Credentials!";
pub(super) const MISSING_SECRET: &str =
    "Server configuration error. JWT secret key is missing!";
pub(super) const MISSING_DATABASE: &str =
    "Database connection error. Please check the database DSN configuration!";

/// A single failed input rule.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub(super) fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ValidationErrors {
    pub errors: Vec<Violation>,
}

/// Every `400` body: a violation list, or a single message for conflicts and
/// bad credentials.
#[derive(ToSchema, Serialize, Debug)]
#[serde(untagged)]
pub enum BadRequest {
    Validation(ValidationErrors),
    Message(MessageResponse),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("request validation failed")]
    Validation(Vec<Violation>),
    #[error("username already exists")]
    UsernameTaken,
    #[error("email already exists")]
    EmailTaken,
    #[error("username or email already exists")]
    Conflict,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("jwt secret is not configured")]
    MissingSecret,
    #[error("database is not configured")]
    MissingDatabase,
    #[error("{message}")]
    Internal {
        message: &'static str,
        detail: Option<String>,
    },
}

impl AuthError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::UsernameTaken
            | Self::EmailTaken
            | Self::Conflict
            | Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::MissingSecret | Self::MissingDatabase | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = MessageResponse::new;
        let bad_request = |message: &str| Json(BadRequest::Message(body(message)));

        match self {
            Self::Validation(errors) => (
                status,
                Json(BadRequest::Validation(ValidationErrors { errors })),
            )
                .into_response(),
            Self::UsernameTaken => (status, bad_request(USERNAME_TAKEN)).into_response(),
            Self::EmailTaken => (status, bad_request(EMAIL_TAKEN)).into_response(),
            Self::Conflict => (status, bad_request(ACCOUNT_TAKEN)).into_response(),
            Self::InvalidCredentials => (status, bad_request(INVALID_CREDENTIALS)).into_response(),
            Self::MissingSecret => (status, Json(body(MISSING_SECRET))).into_response(),
            Self::MissingDatabase => (status, Json(body(MISSING_DATABASE))).into_response(),
            Self::Internal { message, detail } => (
                status,
                Json(MessageResponse {
                    message: message.to_string(),
                    error: detail,
                }),
            )
                .into_response(),
        }
    }
}
