//! Tracing setup for the server binary and integration tests.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "emptytomb_catalog=info,tower_http=info";

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
/// Calling it twice is harmless; the second install is ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
