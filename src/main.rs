use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::net::SocketAddr;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Print the revenue forecast and ledger summary
    Report,
    /// List unpaid bills by due date
    Payables,
    /// Serve the forecast over HTTP
    Serve {
        /// Address to listen on, overriding the config file
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
}

impl From<Commands> for anubis::AppCommand {
    fn from(cmd: Commands) -> anubis::AppCommand {
        match cmd {
            Commands::Report => anubis::AppCommand::Report,
            Commands::Payables => anubis::AppCommand::Payables,
            Commands::Serve { bind } => anubis::AppCommand::Serve { bind },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Some(Commands::Serve { .. }) => LevelFilter::INFO,
        _ => LevelFilter::OFF,
    };
    anubis::core::log::init_logging(cli.verbose, default_level);

    let result = match cli.command {
        Some(Commands::Setup) => anubis::cli::setup::setup(),
        Some(cmd) => anubis::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
