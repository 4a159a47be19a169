#![allow(clippy::needless_for_each)]

use super::handlers::{auth, health, health::Health};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::register::register,
        auth::login::login,
        auth::logout::logout
    ),
    components(schemas(
        Health,
        auth::types::RegisterRequest,
        auth::types::LoginRequest,
        auth::types::MessageResponse,
        auth::types::UserResponse,
        auth::BadRequest,
        auth::ValidationErrors,
        auth::Violation
    )),
    tags(
        (name = "auth", description = "Registration, login and logout"),
        (name = "health", description = "Service and database health")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
