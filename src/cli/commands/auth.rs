use clap::{builder::BoolishValueParser, Arg, ArgAction, Command};

pub const ARG_JWT_SECRET: &str = "jwt-secret";
pub const ARG_ENVIRONMENT: &str = "environment";
pub const ARG_BCRYPT_COST: &str = "bcrypt-cost";
pub const ARG_COOKIE_SECURE: &str = "cookie-secure";
pub const ARG_FRONTEND_ORIGIN: &str = "frontend-origin";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_JWT_SECRET)
                .long("jwt-secret")
                .help("Secret used to sign session tokens")
                .long_help(
                    "Secret used to sign session tokens (HS256). When unset the server still starts, but login answers with a configuration error.",
                )
                .env("GATEKEEP_JWT_SECRET")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_ENVIRONMENT)
                .long("environment")
                .help("Deployment environment; development exposes internal error details")
                .env("GATEKEEP_ENV")
                .default_value("production")
                .value_parser(["development", "production"]),
        )
        .arg(
            Arg::new(ARG_BCRYPT_COST)
                .long("bcrypt-cost")
                .help("bcrypt cost factor for password hashes")
                .env("GATEKEEP_BCRYPT_COST")
                .default_value("10")
                .value_parser(clap::value_parser!(u32).range(4..=31)),
        )
        .arg(
            Arg::new(ARG_COOKIE_SECURE)
                .long("cookie-secure")
                .help("Mark the session cookie as Secure (HTTPS only)")
                .env("GATEKEEP_COOKIE_SECURE")
                .action(ArgAction::SetTrue)
                .value_parser(BoolishValueParser::new()),
        )
        .arg(
            Arg::new(ARG_FRONTEND_ORIGIN)
                .long("frontend-origin")
                .help("Origin allowed to call the API with credentials (CORS)")
                .env("GATEKEEP_FRONTEND_ORIGIN"),
        )
}
