use anyhow::Result;
use clap::Parser;
use weather_backdrop::{cli::Cli, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli)?;
    weather_backdrop::run(cli).await
}
