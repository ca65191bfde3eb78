pub mod types;
pub mod commands;
pub mod logging;

use clap::Parser;
use std::path::PathBuf;

use crate::config;

/// Run the command-line interface
pub async fn run() {
    let cli = types::Cli::parse();

    // Initialize logging system
    logging::init_logging(cli.debug, cli.quiet);

    // Configure backtrace
    logging::configure_backtrace(cli.trace);

    let config = match config::load_config(PathBuf::from("."), cli.config.clone()) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        types::Commands::Build { .. } => commands::handle_build_command(&cli.command, config),
        types::Commands::Navigate { .. } => commands::handle_navigate_command(&cli.command, config).await,
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
