//! Logging setup for the replay CLI.
//!
//! Logs go to stderr so `status --json` output on stdout stays clean.
//! Set `DEBUG_LOGGING=1` to enable debug output for inferno crates.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let filter_directive = if debug_logging {
        // debug for inferno crates, info for dependencies
        "info,inferno_core=debug,inferno_cli=debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(EnvFilter::new(filter_directive))
        .init();

    tracing::debug!(debug_logging, "logging initialized");
}
