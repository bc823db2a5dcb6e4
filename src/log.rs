// src/log.rs
//! Log setup for the binaries. The library only emits `tracing` events.
//!
//! `RUST_LOG` controls filtering (default `info`), e.g.
//! `RUST_LOG=bildir_scrape=debug,reqwest=warn`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install a compact stderr subscriber. Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(filter);

    // Already installed (tests, repeated calls) is fine.
    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}
