pub mod cli;
pub mod core;
pub mod providers;
pub mod server;

use crate::core::Ledger;
use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Report,
    Payables,
    Serve { bind: Option<SocketAddr> },
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    match config_path {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    }
}

/// Connects a ledger to the configured store. Fails early when the API key
/// variable is unset.
pub fn build_ledger(config: &AppConfig) -> Result<Ledger> {
    let store = providers::SupabaseStore::from_config(&config.store)
        .context("Failed to create record store client")?;
    debug!("Using record store {:?}", store);
    Ok(Ledger::new(Arc::new(store), &config.store.collection))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Anubis starting...");

    let config = load_config(config_path)?;
    debug!("Loaded config: {config:#?}");

    let ledger = build_ledger(&config)?;

    match command {
        AppCommand::Report => {
            cli::report::run(
                &ledger,
                &config.forecast.report_params(),
                &config.currency_symbol,
            )
            .await
        }
        AppCommand::Payables => {
            let today = chrono::Local::now().date_naive();
            cli::payables::run(&ledger, today, &config.currency_symbol).await
        }
        AppCommand::Serve { bind } => {
            let state = server::AppState {
                ledger,
                params: config.forecast.endpoint_params(),
            };
            server::run_server(bind.unwrap_or(config.server.bind), state).await
        }
    }
}
