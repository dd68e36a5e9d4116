// linecut - removes a fixed range of lines from a text file in place

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing::debug;

pub use commands::{LineRangeDeleter, Outcome};
pub use error::{LinecutError, LinecutResult};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Initialize logging on stderr
///
/// Stdout carries the console report, so log lines never go there.
/// `RUST_LOG` wins over the verbosity flag when set.
pub fn init_with_logger(verbose: bool) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let default_directive = if verbose { "linecut=debug" } else { "linecut=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    fmt::Subscriber::builder()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    debug!("Initializing linecut v{}", version());
    Ok(())
}
