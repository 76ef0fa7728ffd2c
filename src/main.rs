use anyhow::Result;
use spark_proxy::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
