//! Auth configuration and shared request state.

use secrecy::SecretString;
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::error;

use super::{
    error::AuthError,
    password::{self, PasswordError},
    storage::UserStore,
};

pub const DEFAULT_BCRYPT_COST: u32 = 10;

// Only used to burn a hash comparison when the username is unknown.
const DUMMY_PASSWORD: &str = "gatekeep-timing-equalizer";

/// Deployment mode; controls whether internal error details reach clients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// Parse the CLI/env value; clap only lets `development` or `production` through.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "development" => Self::Development,
            _ => Self::Production,
        }
    }

    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Debug)]
pub struct AuthConfig {
    jwt_secret: Option<SecretString>,
    environment: Environment,
    bcrypt_cost: u32,
    cookie_secure: bool,
    frontend_origin: Option<String>,
}

impl AuthConfig {
    #[must_use]
    pub fn new(jwt_secret: Option<SecretString>) -> Self {
        Self {
            jwt_secret,
            environment: Environment::default(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            cookie_secure: false,
            frontend_origin: None,
        }
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    #[must_use]
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    #[must_use]
    pub fn with_frontend_origin(mut self, origin: Option<String>) -> Self {
        self.frontend_origin = origin;
        self
    }

    #[must_use]
    pub fn jwt_secret(&self) -> Option<&SecretString> {
        self.jwt_secret.as_ref()
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    #[must_use]
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    #[must_use]
    pub fn frontend_origin(&self) -> Option<&str> {
        self.frontend_origin.as_deref()
    }
}

/// State shared by every auth handler.
///
/// The store is optional so a missing DSN surfaces as a request error instead
/// of preventing startup.
#[derive(Debug)]
pub struct AuthState {
    config: AuthConfig,
    store: Option<Arc<dyn UserStore>>,
    dummy_hash: OnceCell<String>,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, store: Option<Arc<dyn UserStore>>) -> Self {
        Self {
            config,
            store,
            dummy_hash: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// # Errors
    /// Returns [`AuthError::MissingDatabase`] when no DSN was configured.
    pub fn store(&self) -> Result<&dyn UserStore, AuthError> {
        self.store.as_deref().ok_or(AuthError::MissingDatabase)
    }

    /// Build a 500 for `message`, attaching `err` only in development mode.
    pub(super) fn internal_error(&self, message: &'static str, err: impl Display) -> AuthError {
        error!("{message} {err}");
        AuthError::Internal {
            message,
            detail: self
                .config
                .environment()
                .is_development()
                .then(|| err.to_string()),
        }
    }

    /// Compute the dummy hash ahead of the first login so an unknown username
    /// never pays for a hash on top of the verify.
    ///
    /// # Errors
    /// Returns an error if bcrypt rejects the configured cost.
    pub async fn prepare(&self) -> Result<(), PasswordError> {
        self.dummy_hash().await.map(|_| ())
    }

    pub(super) fn dummy_hash_ready(&self) -> bool {
        self.dummy_hash.initialized()
    }

    /// Hash of a throwaway password at the configured cost, computed once.
    pub(super) async fn dummy_hash(&self) -> Result<&str, PasswordError> {
        self.dummy_hash
            .get_or_try_init(|| password::hash(DUMMY_PASSWORD.to_string(), self.config.bcrypt_cost))
            .await
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn environment_parse_defaults_to_production() {
        assert_eq!(Environment::parse("development"), Environment::Development);
        assert_eq!(Environment::parse(" Development "), Environment::Development);
        assert_eq!(Environment::parse("dev"), Environment::Production);
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("staging"), Environment::Production);
    }

    #[test]
    fn auth_config_defaults() {
        let config = AuthConfig::new(Some(SecretString::from("secret".to_string())));
        assert_eq!(config.bcrypt_cost(), DEFAULT_BCRYPT_COST);
        assert_eq!(config.environment(), Environment::Production);
        assert!(!config.cookie_secure());
        assert!(config.frontend_origin().is_none());
        assert_eq!(
            config.jwt_secret().map(|secret| secret.expose_secret()),
            Some("secret")
        );
    }

    #[test]
    fn internal_error_hides_detail_in_production() {
        let state = AuthState::new(AuthConfig::new(None), None);
        let err = state.internal_error("Failed to login!", "connection refused");
        assert!(matches!(
            err,
            AuthError::Internal {
                message: "Failed to login!",
                detail: None
            }
        ));
    }

    #[test]
    fn internal_error_exposes_detail_in_development() {
        let state = AuthState::new(
            AuthConfig::new(None).with_environment(Environment::Development),
            None,
        );
        let err = state.internal_error("Failed to login!", "connection refused");
        match err {
            AuthError::Internal { detail, .. } => {
                assert_eq!(detail.as_deref(), Some("connection refused"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn prepare_computes_dummy_hash_once() -> anyhow::Result<()> {
        let state = AuthState::new(AuthConfig::new(None).with_bcrypt_cost(4), None);
        assert!(!state.dummy_hash_ready());

        state.prepare().await?;
        assert!(state.dummy_hash_ready());

        let first = state.dummy_hash().await?.to_string();
        assert!(first.starts_with("$2b$04$"), "unexpected hash: {first}");
        state.prepare().await?;
        assert_eq!(state.dummy_hash().await?, first);
        Ok(())
    }

    #[tokio::test]
    async fn prepare_rejects_invalid_cost() {
        let state = AuthState::new(AuthConfig::new(None).with_bcrypt_cost(3), None);
        assert!(state.prepare().await.is_err());
        assert!(!state.dummy_hash_ready());
    }

    #[test]
    fn store_missing_is_reported() {
        let state = AuthState::new(AuthConfig::new(None), None);
        assert!(matches!(state.store(), Err(AuthError::MissingDatabase)));
    }
}
