//! Subscriber setup for the binary; library crates only emit events.

use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber honouring `RUST_LOG`.
///
/// Falls back to `warn`, or `debug` when `verbose` is set. Safe to call more
/// than once; later calls are ignored.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
