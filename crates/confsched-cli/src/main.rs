//! confsched CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use confsched_cli::cli::{Cli, Command, ConfigAction};
use confsched_cli::commands;
use confsched_cli::config::ClientConfig;
use confsched_cli::error::{ClientError, ClientResult};
use confsched_core::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tracing_config = config.logging.tracing_config(cli.debug || config.debug);
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> ClientResult<ClientConfig> {
    match cli.config {
        Some(ref path) => ClientConfig::load_from(path).map_err(ClientError::Config),
        None => ClientConfig::load().map_err(ClientError::Config),
    }
}

async fn run(cli: Cli, config: ClientConfig) -> ClientResult<()> {
    match cli.command {
        Command::Config { action } => {
            let path = cli.config.unwrap_or_else(ClientConfig::default_path);
            match action {
                ConfigAction::Dump => commands::config::dump(&config, &path),
                ConfigAction::Validate => commands::config::validate(&config),
                ConfigAction::Path => commands::config::path(&path),
            }
        }
        Command::Schedule(command) => {
            let schedule =
                commands::load(cli.input.as_deref(), cli.url.as_deref(), &config).await?;
            commands::run(command, &schedule, &config)
        }
    }
}
