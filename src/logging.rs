//! Log output for the `pokedex` binary
//!
//! Library code only emits `tracing` events. The binary installs a stderr
//! subscriber so log lines never mix with command output on stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Maps `-v` occurrences to a default filter directive
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Builds the filter, letting `RUST_LOG` override the verbosity flag
pub fn build_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}

/// Installs the global subscriber
///
/// Does nothing if a subscriber is already installed.
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbosity))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .try_init();
}
