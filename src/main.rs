use anyhow::Result;
use neural_odyssey::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
