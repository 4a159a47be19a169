pub mod auth;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};
use std::sync::OnceLock;

static LONG_VERSION: OnceLock<String> = OnceLock::new();

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version = LONG_VERSION
        .get_or_init(|| format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH))
        .as_str();

    let command = Command::new("gatekeep")
        .about("User registration, login and logout service")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("GATEKEEP_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("dsn")
                .short('d')
                .long("dsn")
                .help("Database connection string")
                .long_help(
                    "Postgres connection string. When unset the server still starts, but register and login answer with a database configuration error.",
                )
                .env("GATEKEEP_DSN")
                .hide_env_values(true),
        );

    let command = auth::with_args(command);
    logging::with_args(command)
}
