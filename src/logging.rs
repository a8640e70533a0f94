//! Tracing subscriber setup for the CLI.

use crate::config::{LOG_ENV, LoggingSection};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `CHAINBUILD_LOG` wins over the configured level. Logs go to stderr so
/// command output stays clean.
pub fn init(logging: &LoggingSection, verbose: bool) {
    let default_level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed (e.g. by an embedding process).
    let _ = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
