use anyhow::Result;
use ipl_ai::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
