use crate::{
    api::Environment,
    cli::{
        actions::{server, Action},
        commands::auth,
    },
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use url::Url;

/// Turn parsed arguments into the action to run.
///
/// # Errors
/// Returns an error if the DSN is not a valid URL.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let dsn = matches
        .get_one::<String>("dsn")
        .map(|dsn| dsn.trim().to_string())
        .filter(|dsn| !dsn.is_empty());

    if let Some(dsn) = &dsn {
        Url::parse(dsn).context("Invalid database DSN")?;
    }

    let jwt_secret = matches
        .get_one::<String>(auth::ARG_JWT_SECRET)
        .filter(|secret| !secret.is_empty())
        .map(|secret| SecretString::from(secret.clone()));

    Ok(Action::Server(server::Args {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        dsn,
        jwt_secret,
        environment: matches
            .get_one::<String>(auth::ARG_ENVIRONMENT)
            .map_or_else(Environment::default, |value| Environment::parse(value)),
        bcrypt_cost: matches
            .get_one::<u32>(auth::ARG_BCRYPT_COST)
            .copied()
            .unwrap_or(crate::api::handlers::auth::DEFAULT_BCRYPT_COST),
        cookie_secure: matches.get_flag(auth::ARG_COOKIE_SECURE),
        frontend_origin: matches
            .get_one::<String>(auth::ARG_FRONTEND_ORIGIN)
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    const ENV_VARS: [&str; 7] = [
        "GATEKEEP_PORT",
        "GATEKEEP_DSN",
        "GATEKEEP_JWT_SECRET",
        "GATEKEEP_ENV",
        "GATEKEEP_BCRYPT_COST",
        "GATEKEEP_COOKIE_SECURE",
        "GATEKEEP_FRONTEND_ORIGIN",
    ];

    fn server_args(args: Vec<&str>) -> Result<server::Args> {
        let matches = commands::new().try_get_matches_from(args)?;
        let Action::Server(args) = handler(&matches)?;
        Ok(args)
    }

    #[test]
    fn handler_defaults() {
        temp_env::with_vars(ENV_VARS.map(|key| (key, None::<&str>)), || {
            let args = server_args(vec!["gatekeep"]);
            let Ok(args) = args else {
                panic!("expected defaults to parse: {args:?}");
            };
            assert_eq!(args.port, 8080);
            assert!(args.dsn.is_none());
            assert!(args.jwt_secret.is_none());
            assert_eq!(args.environment, Environment::Production);
            assert_eq!(args.bcrypt_cost, 10);
            assert!(!args.cookie_secure);
            assert!(args.frontend_origin.is_none());
        });
    }

    #[test]
    fn handler_reads_every_option() {
        temp_env::with_vars(ENV_VARS.map(|key| (key, None::<&str>)), || {
            let args = server_args(vec![
                "gatekeep",
                "--port",
                "9000",
                "--dsn",
                "postgres://gatekeep@localhost:5432/gatekeep",
                "--jwt-secret",
                "s3cret",
                "--environment",
                "development",
                "--bcrypt-cost",
                "12",
                "--cookie-secure",
                "--frontend-origin",
                "https://app.gatekeep.dev",
            ]);
            let Ok(args) = args else {
                panic!("expected arguments to parse: {args:?}");
            };
            assert_eq!(args.port, 9000);
            assert_eq!(
                args.dsn.as_deref(),
                Some("postgres://gatekeep@localhost:5432/gatekeep")
            );
            assert_eq!(
                args.jwt_secret.as_ref().map(|secret| secret.expose_secret()),
                Some("s3cret")
            );
            assert_eq!(args.environment, Environment::Development);
            assert_eq!(args.bcrypt_cost, 12);
            assert!(args.cookie_secure);
            assert_eq!(
                args.frontend_origin.as_deref(),
                Some("https://app.gatekeep.dev")
            );
        });
    }

    #[test]
    fn handler_treats_empty_secret_as_missing() {
        let vars = ENV_VARS.map(|key| {
            if key == "GATEKEEP_JWT_SECRET" {
                (key, Some(""))
            } else {
                (key, None)
            }
        });
        temp_env::with_vars(vars, || {
            let args = server_args(vec!["gatekeep", "--jwt-secret", ""]);
            assert!(matches!(args, Ok(args) if args.jwt_secret.is_none()));
        });
    }

    #[test]
    fn handler_rejects_invalid_dsn() {
        temp_env::with_vars(ENV_VARS.map(|key| (key, None::<&str>)), || {
            assert!(server_args(vec!["gatekeep", "--dsn", "not a url"]).is_err());
        });
    }
}
