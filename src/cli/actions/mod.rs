pub mod server;

use crate::cli::telemetry;
use anyhow::Result;

#[derive(Debug)]
pub enum Action {
    Server(server::Args),
}

impl Action {
    /// Run the action to completion, then flush pending spans.
    ///
    /// # Errors
    /// Propagates any error from the underlying action.
    pub async fn execute(self) -> Result<()> {
        let result = match self {
            Self::Server(args) => server::handle(args).await,
        };

        telemetry::shutdown_tracer();

        result
    }
}
