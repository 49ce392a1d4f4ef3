//! Logging setup

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Default filter directive when `RUST_LOG` is unset.
pub fn default_directive(debug: bool) -> &'static str {
    if debug { "debug" } else { "info" }
}

/// Initialize the global subscriber: fmt output on stderr, filtered by
/// `RUST_LOG` or the `--debug` level.
///
/// Call this once at startup; later calls are ignored.
pub fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // Try to set as global default (ignore error if already set)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
