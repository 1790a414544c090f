use anyhow::Result;
use bwsweep::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::start().await
}
