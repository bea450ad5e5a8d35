//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`; user-facing output stays on
//! stdout via `ui::messages`. `RUST_LOG` wins over the `--verbose` default.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Safe to call more than once: later calls
/// are ignored.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
