use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    error::{AuthError, BadRequest},
    password,
    state::AuthState,
    storage::{InsertOutcome, NewUser},
    types::{MessageResponse, RegisterRequest},
    validation,
};

const REGISTER_FAILED: &str = "Failed to create user!";

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = MessageResponse, content_type = "application/json"),
        (status = 400, description = "Invalid input (violation list), or the username or email is already taken (message)", body = BadRequest),
        (status = 500, description = "Database unavailable or not configured", body = MessageResponse)
    ),
    tag = "auth"
)]
#[instrument(skip(auth_state, payload))]
pub async fn register(
    auth_state: Extension<Arc<AuthState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let input = validation::register(payload)?;
    let store = auth_state.store()?;

    let existing = store
        .find_by_username_or_email(&input.username, &input.email)
        .await
        .map_err(|err| auth_state.internal_error(REGISTER_FAILED, err))?;

    if let Some(existing) = existing {
        debug!("registration rejected, account exists");
        if existing.username == input.username {
            return Err(AuthError::UsernameTaken);
        }
        return Err(AuthError::EmailTaken);
    }

    let password_hash = password::hash(input.password, auth_state.config().bcrypt_cost())
        .await
        .map_err(|err| auth_state.internal_error(REGISTER_FAILED, err))?;

    let outcome = store
        .insert(NewUser {
            username: input.username,
            email: input.email,
            password_hash,
        })
        .await
        .map_err(|err| auth_state.internal_error(REGISTER_FAILED, err))?;

    match outcome {
        InsertOutcome::Created(user) => {
            debug!(user_id = %user.id, "user created");
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse::new("User created successfully")),
            ))
        }
        // Lost a race with a concurrent registration for the same username or email.
        InsertOutcome::Conflict => Err(AuthError::Conflict),
    }
}
