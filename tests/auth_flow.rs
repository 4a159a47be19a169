//! End-to-end auth flow through the public router.
//!
//! Flow:
//! 1. Register `alice`.
//! 2. Register `alice` again with a different email (username conflict).
//! 3. Register `bob` with alice's email (email conflict).
//! 4. Log in with a wrong password, then with the right one.
//! 5. Decode the cookie token and log out.

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{
        header::{CONTENT_TYPE, SET_COOKIE},
        Method, Request, StatusCode,
    },
    Router,
};
use gatekeep::api::{
    handlers::auth::session, router, AuthConfig, AuthState, MemoryUserStore, UserStore,
};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "integration-secret";

fn app() -> Result<Router> {
    let config =
        AuthConfig::new(Some(SecretString::from(SECRET.to_string()))).with_bcrypt_cost(4);
    let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    router(Arc::new(AuthState::new(config, Some(store))))
}

async fn post(app: &Router, uri: &str, body: Value) -> Result<(StatusCode, Option<String>, Value)> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?;

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = serde_json::from_slice(&bytes).context("response body is not json")?;

    Ok((status, cookie, body))
}

#[tokio::test]
async fn register_login_logout() -> Result<()> {
    let app = app()?;

    let (status, _, body) = post(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "email": "alice@x.com", "password": "secret1"}),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"message": "User created successfully"}));

    let (status, _, body) = post(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "email": "other@x.com", "password": "secret2"}),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Username already exists!"}));

    let (status, _, body) = post(
        &app,
        "/api/auth/register",
        json!({"username": "bob", "email": "alice@x.com", "password": "secret3"}),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Email already exists!"}));

    let (status, cookie, body) = post(
        &app,
        "/api/auth/login",
        json!({"username": "alice", "password": "wrong"}),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(cookie.is_none());
    assert_eq!(body, json!({"message": "Invalid Credentials!"}));

    let (status, cookie, body) = post(
        &app,
        "/api/auth/login",
        json!({"username": "alice", "password": "secret1"}),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@x.com");
    assert!(body.get("password").is_none());

    let cookie = cookie.context("login must set the session cookie")?;
    let token = cookie
        .strip_prefix("token=")
        .and_then(|rest| rest.split(';').next())
        .context("cookie must carry the token")?;
    let claims = session::decode(token, &SecretString::from(SECRET.to_string()))?;
    assert_eq!(Value::String(claims.id), body["id"]);
    assert!(!claims.is_admin);
    assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);

    let (status, cookie, body) = post(&app, "/api/auth/logout", json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Logout Successful"}));
    let cookie = cookie.context("logout must clear the session cookie")?;
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));

    Ok(())
}
