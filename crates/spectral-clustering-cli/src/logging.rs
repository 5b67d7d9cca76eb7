//! Logging initialisation for the spectral clustering CLI.
//!
//! Installs a global `tracing` subscriber (env-filter + human-readable fmt
//! layer, writing to stderr so stdout stays free for piped CSV output). The
//! log level is controlled via `RUST_LOG`; it defaults to `info`.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber, if it has not already been installed.
///
/// Safe to call more than once (e.g. from multiple integration tests in the
/// same process); subsequent calls are no-ops.
pub fn init() {
    if INITIALISED.get().is_some() {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();

    let _ = INITIALISED.set(());
}
