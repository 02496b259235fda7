//! # Logging
//!
//! Installs the `tracing` subscriber. Output goes to stderr so `--dry-run`
//! can pipe the routes table from stdout.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "routegen=info,routegen_core=info,warn";

/// Initializes logging from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
///
/// `verbose` raises both crates to `debug` when `RUST_LOG` is unset.
pub fn init(verbose: bool) {
    let fallback = if verbose {
        "routegen=debug,routegen_core=debug,warn"
    } else {
        DEFAULT_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be set (e.g. by a test harness).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
