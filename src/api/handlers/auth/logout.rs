use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::error;

use super::{session::clear_session_cookie, state::AuthState, types::MessageResponse};

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse, content_type = "application/json")
    ),
    tag = "auth"
)]
pub async fn logout(auth_state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    // Always clear the cookie, even if the client never logged in.
    let mut headers = HeaderMap::new();
    match clear_session_cookie(auth_state.config()) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build logout cookie: {err}"),
    }

    (
        StatusCode::OK,
        headers,
        Json(MessageResponse::new("Logout Successful")),
    )
}
