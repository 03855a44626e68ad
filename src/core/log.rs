// Logging initialization
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Installs the global subscriber. `RUST_LOG` wins when set; otherwise
/// `verbose` turns on debug output for this crate only.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("fxconv=debug")
    } else {
        EnvFilter::new("off")
    }
}
