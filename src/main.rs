use anyhow::Result;
use clap::Parser;
use stormbio::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    stormbio::logging::init(cli.log_file.as_deref())?;
    stormbio::run(cli).await
}
