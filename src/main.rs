use clap::Parser;
use tracing::debug;

use cities::cli::Cli;
use cities::config::{DEFAULT_CONFIG_PATH, get_config, init_config_from};
use cities::system::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_config_from(cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH));
    let config = get_config();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(&config.logging)?;
    debug!("Configuration loaded");

    if let Err(e) = cities::commands::execute(cli.command).await {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }

    Ok(())
}
