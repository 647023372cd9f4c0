//! Opt-in tracing initialization for binaries and integration tests. The
//! embedding process may install its own subscriber instead; nothing in
//! this crate requires this helper to have run.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a formatted subscriber honoring `RUST_LOG`, defaulting to info
/// for this crate. Calling it twice is an error from the subscriber
/// registry, so binaries should call it exactly once at startup.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rental_search=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
