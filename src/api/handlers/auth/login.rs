use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use super::{
    error::{AuthError, BadRequest},
    password, session,
    state::AuthState,
    types::{LoginRequest, MessageResponse, UserResponse},
    validation,
};

const LOGIN_FAILED: &str = "Failed to login!";

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = UserResponse, content_type = "application/json"),
        (status = 400, description = "Invalid input (violation list) or invalid credentials (message)", body = BadRequest),
        (status = 500, description = "JWT secret or database not configured, or database failure", body = MessageResponse)
    ),
    tag = "auth"
)]
#[instrument(skip(auth_state, payload))]
pub async fn login(
    auth_state: Extension<Arc<AuthState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let input = validation::login(payload)?;
    let store = auth_state.store()?;

    let user = store
        .find_by_username(&input.username)
        .await
        .map_err(|err| auth_state.internal_error(LOGIN_FAILED, err))?;

    let Some(user) = user else {
        // Spend the same bcrypt work as a real comparison so unknown usernames
        // cannot be told apart by response time.
        match auth_state.dummy_hash().await {
            Ok(hash) => {
                let _ = password::verify(input.password, hash.to_string()).await;
            }
            Err(err) => error!("Failed to prepare dummy hash: {err}"),
        }
        debug!("login rejected, unknown user");
        return Err(AuthError::InvalidCredentials);
    };

    let valid = password::verify(input.password, user.password_hash.clone())
        .await
        .map_err(|err| auth_state.internal_error(LOGIN_FAILED, err))?;

    if !valid {
        debug!("login rejected, wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    let Some(secret) = auth_state.config().jwt_secret() else {
        error!("JWT secret is not configured");
        return Err(AuthError::MissingSecret);
    };

    let token = session::issue(user.id, secret, Utc::now().timestamp())
        .map_err(|err| auth_state.internal_error(LOGIN_FAILED, err))?;

    let cookie = session::session_cookie(auth_state.config(), &token)
        .map_err(|err| auth_state.internal_error(LOGIN_FAILED, err))?;

    debug!(user_id = %user.id, "login successful");

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(UserResponse::from(user)),
    ))
}
