use std::time::Duration;

use clap::Parser;
use flexi_logger::Logger;
use log::{debug, error};
use stripe_checkout::{ClientConfig, StripeClient};

mod cli;
mod commands;
mod error;

use cli::Cli;
use error::CliError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays pure JSON.
    let _logger = Logger::try_with_str(&cli.log_level)?.start()?;

    let api_key = match cli.api_key {
        Some(key) => key,
        None => {
            error!("{}", CliError::MissingApiKey);
            std::process::exit(CliError::MissingApiKey.exit_code());
        }
    };

    let mut config = ClientConfig::new(api_key)
        .with_base_url(cli.base_url)
        .with_timeout(Duration::from_secs(cli.timeout));
    if let Some(version) = cli.stripe_version {
        config = config.with_stripe_version(version);
    }
    debug!("Using API at {}", config.url_for("/"));

    let client = StripeClient::new(config)?;
    match commands::run(&client, cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}
