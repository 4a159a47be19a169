use anyhow::Result;
use gatekeep::cli::start;

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let action = start()?;

    // Handle the action
    action.execute().await
}
