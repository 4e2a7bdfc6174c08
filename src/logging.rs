//! Tracing setup
//!
//! The library only emits `tracing` events; installing a subscriber is up to the
//! host. The `synscan` binary calls [`init_tracing`] at startup.
//!
//! - `RUST_LOG=synscan=debug`: re-scan and re-tokenize decisions, registrations
//! - `RUST_LOG=synscan=trace`: line ranges touched by each incremental re-scan
//! - `RUST_LOG=synscan::outline=warn`: only failed structural parses

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber filtered by `RUST_LOG`
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
