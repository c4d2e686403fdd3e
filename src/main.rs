use clap::Parser;

use biohub::config::Config;
use biohub::logging::init_tracing;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    init_tracing(&config.logging.filter);

    let mut host = cli::Host::from_config(&config)?;
    host.run(cli.command).await
}
