use crate::cli::{
    actions::Action,
    commands::{self, logging},
    dispatch::handler,
    telemetry::{self, LogFormat},
};
use anyhow::Result;

/// Start the CLI
///
/// # Errors
/// Returns an error if logging cannot be initialised or the arguments are invalid.
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    let verbosity_level = verbosity(
        matches
            .get_one::<u8>(logging::ARG_VERBOSITY)
            .map_or(0, |&v| v),
    );

    let log_format = matches
        .get_one::<String>(logging::ARG_LOG_FORMAT)
        .map_or_else(LogFormat::default, |format| LogFormat::parse(format));

    telemetry::init(verbosity_level, log_format)?;

    let action = handler(&matches)?;

    Ok(action)
}

const fn verbosity(level: u8) -> tracing::Level {
    match level {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}
