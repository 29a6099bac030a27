//! Tracing initialization for the e2e binaries
//!
//! Logs go to stderr so that stdout stays usable for `export` lines.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`]. Calling this
/// more than once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();

    if let Err(e) = installed {
        tracing::debug!(error = %e, "Tracing subscriber already installed, keeping it");
    }
}
