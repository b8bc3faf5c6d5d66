//! Log subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs a formatted `tracing` subscriber as the global default.
///
/// `RUST_LOG` takes precedence over `default_filter`. Calling this more than
/// once leaves the first subscriber in place.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
