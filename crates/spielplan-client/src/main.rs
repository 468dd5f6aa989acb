//! spielplan CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use spielplan_client::cli::{Cli, Command, TokenAction};
use spielplan_client::config::ClientConfig;
use spielplan_client::error::{ClientError, ClientResult};
use spielplan_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::debug()
    } else {
        TracingConfig::default()
    };
    if let Err(error) = init_tracing(tracing_config) {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().map_err(ClientError::Config)?
    };

    match cli.command {
        Command::Sync => spielplan_client::commands::sync::run(&config).await,
        Command::List {
            query,
            subject,
            area,
            json,
        } => spielplan_client::commands::list::run(&config, query, subject, area, json),
        Command::Export { output } => spielplan_client::commands::export::run(&config, &output),
        Command::Select { fixture_id } => {
            spielplan_client::commands::select::run(&config, &fixture_id, true)
        }
        Command::Unselect { fixture_id } => {
            spielplan_client::commands::select::run(&config, &fixture_id, false)
        }
        Command::Token { action } => match action {
            TokenAction::Set { token } => spielplan_client::commands::token::set(&config, &token),
            TokenAction::Show => spielplan_client::commands::token::show(&config),
            TokenAction::Clear => spielplan_client::commands::token::clear(&config),
        },
        Command::Cleanup => spielplan_client::commands::cleanup::run(&config),
    }
}
