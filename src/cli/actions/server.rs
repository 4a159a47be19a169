use crate::api::{self, AuthConfig, Environment};
use anyhow::Result;
use secrecy::SecretString;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: Option<String>,
    pub jwt_secret: Option<SecretString>,
    pub environment: Environment,
    pub bcrypt_cost: u32,
    pub cookie_secure: bool,
    pub frontend_origin: Option<String>,
}

impl Args {
    fn auth_config(self) -> (u16, Option<String>, AuthConfig) {
        let config = AuthConfig::new(self.jwt_secret)
            .with_environment(self.environment)
            .with_bcrypt_cost(self.bcrypt_cost)
            .with_cookie_secure(self.cookie_secure)
            .with_frontend_origin(self.frontend_origin);
        (self.port, self.dsn, config)
    }
}

/// Handle the server action
///
/// # Errors
/// Returns an error if the server fails to start or stops abnormally.
pub async fn handle(args: Args) -> Result<()> {
    let (port, dsn, config) = args.auth_config();

    info!(
        port,
        environment = ?config.environment(),
        bcrypt_cost = config.bcrypt_cost(),
        "starting gatekeep"
    );

    api::new(port, dsn, config).await
}
