//! Input rules for register and login.
//!
//! Every rule is checked so the client gets the full list of violations in one
//! response.

use axum::{extract::rejection::JsonRejection, Json};
use regex::Regex;

use super::{
    error::{AuthError, Violation},
    types::{LoginRequest, RegisterRequest},
};

const USERNAME_MIN_LEN: usize = 3;
const PASSWORD_MIN_LEN: usize = 6;

const REGISTER_USERNAME: &str = "Username is required and should be at least 3 characters";
const REGISTER_EMAIL: &str = "Please include a valid email";
const REGISTER_PASSWORD: &str = "Password should be at least 6 characters";
const LOGIN_USERNAME: &str = "Username is required";
const LOGIN_PASSWORD: &str = "Password is required";

#[derive(Debug)]
pub(super) struct RegisterInput {
    pub(super) username: String,
    pub(super) email: String,
    pub(super) password: String,
}

#[derive(Debug)]
pub(super) struct LoginInput {
    pub(super) username: String,
    pub(super) password: String,
}

pub(super) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

fn min_len(value: Option<&str>, min: usize) -> bool {
    value.is_some_and(|value| value.chars().count() >= min)
}

fn body_violation(rejection: &JsonRejection) -> AuthError {
    AuthError::Validation(vec![Violation::new("body", &rejection.body_text())])
}

pub(super) fn register(
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<RegisterInput, AuthError> {
    let Json(request) = payload.map_err(|rejection| body_violation(&rejection))?;

    let mut violations = Vec::new();
    if !min_len(request.username.as_deref(), USERNAME_MIN_LEN) {
        violations.push(Violation::new("username", REGISTER_USERNAME));
    }
    if !request.email.as_deref().is_some_and(valid_email) {
        violations.push(Violation::new("email", REGISTER_EMAIL));
    }
    if !min_len(request.password.as_deref(), PASSWORD_MIN_LEN) {
        violations.push(Violation::new("password", REGISTER_PASSWORD));
    }

    match (request.username, request.email, request.password) {
        (Some(username), Some(email), Some(password)) if violations.is_empty() => {
            Ok(RegisterInput {
                username,
                email,
                password,
            })
        }
        _ => Err(AuthError::Validation(violations)),
    }
}

pub(super) fn login(
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<LoginInput, AuthError> {
    let Json(request) = payload.map_err(|rejection| body_violation(&rejection))?;

    let mut violations = Vec::new();
    if !request.username.as_deref().is_some_and(|name| !name.is_empty()) {
        violations.push(Violation::new("username", LOGIN_USERNAME));
    }
    if request.password.is_none() {
        violations.push(Violation::new("password", LOGIN_PASSWORD));
    }

    match (request.username, request.password) {
        (Some(username), Some(password)) if violations.is_empty() => {
            Ok(LoginInput { username, password })
        }
        _ => Err(AuthError::Validation(violations)),
    }
}
