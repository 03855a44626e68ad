use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::core::log::init_logging;
use std::process::ExitCode;

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
    /// Convert an amount from one currency to another
    Convert {
        /// Destination currency code, e.g. USD
        target: String,

        /// Amount in the base currency
        #[arg(default_value = "1", allow_hyphen_values = true)]
        amount: String,

        /// Base currency code, e.g. CAD (defaults to the configured one)
        #[arg(short, long)]
        from: Option<String>,

        /// FreeCurrencyAPI key, overrides the config file
        #[arg(long, env = "FREECURRENCYAPI_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// Describe this tool
    About,
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Convert {
                target,
                amount,
                from,
                api_key,
            } => fxconv::AppCommand::Convert {
                base: from,
                target,
                amount,
                api_key,
            },
            Commands::About => fxconv::AppCommand::About,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => {
            fxconv::cli::setup::setup(cli.config_path.as_deref()).map(|_| true)
        }
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(true)
        }
    };

    match result {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::FAILURE),
        Err(e) => {
            tracing::error!(error = %e, "Application failed");
            Err(e)
        }
    }
}
