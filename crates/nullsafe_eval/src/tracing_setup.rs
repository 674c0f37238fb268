//! Opt-in tracing output.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber that prints evaluation spans to stderr.
///
/// Call this once at startup. Safe to call multiple times, and a no-op when
/// another global subscriber is already installed.
/// Enable with `RUST_LOG=nullsafe_eval=debug` or `RUST_LOG=nullsafe_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .try_init();
        }
    });
}
