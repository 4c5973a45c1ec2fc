//! Terminal logging setup.
//!
//! `RUST_LOG` takes precedence over the level passed in, e.g.
//! `RUST_LOG=lifo_queue_sim::simulation=trace` shows every scheduling decision.
//! Logs go to stderr; stdout is left to the binary's results.

use std::io;

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lifo_queue_sim={}", level)));

    // a second call finds a subscriber already installed and does nothing
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .with(filter)
        .try_init();
}
