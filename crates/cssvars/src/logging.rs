//! Log output setup for binaries built on this crate.
//!
//! The library itself only emits `tracing` events. Applications decide where
//! they go; [`init`] installs a plain formatter on stderr with a level derived
//! from a verbosity count, unless `RUST_LOG` says otherwise.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count.
pub fn directive_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity`. Fails if a global subscriber
/// is already set.
pub fn init(verbosity: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive_for(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
}
