pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::debug;

/// Fallback base currency when neither `--from` nor the config names one
pub const DEFAULT_BASE_CURRENCY: &str = "CAD";

pub enum AppCommand {
    Convert {
        base: Option<String>,
        target: String,
        amount: String,
        api_key: Option<String>,
    },
    About,
}

/// Runs a command and reports whether it succeeded.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<bool> {
    match command {
        AppCommand::About => {
            cli::about::run();
            Ok(true)
        }
        AppCommand::Convert {
            base,
            target,
            amount,
            api_key,
        } => {
            let config = match config_path {
                Some(path) => AppConfig::load_from_path(path)?,
                None => AppConfig::load()?,
            };
            debug!(
                base_url = %config.providers.freecurrencyapi.base_url,
                base_currency = ?config.base_currency,
                "Loaded config"
            );

            let base = base
                .or(config.base_currency.clone())
                .unwrap_or_else(|| DEFAULT_BASE_CURRENCY.to_string());

            // Bad input is reported before a missing key or provider setup
            if let Err(e) = crate::core::validate::validate(&base, &target, &amount) {
                cli::convert::report_error(&e);
                return Ok(false);
            }

            let api_key = config.resolve_api_key(api_key.as_deref())?;
            let provider = providers::FreeCurrencyApiProvider::new(
                &config.providers.freecurrencyapi.base_url,
                &api_key,
            )?;

            cli::convert::run(&base, &target, &amount, &provider).await
        }
    }
}
