// src/telemetry.rs
// =============================================================================
// Logging setup.
//
// Logs go to stderr so that `--json` output on stdout stays machine readable.
// RUST_LOG overrides the default filter, e.g. RUST_LOG=wiki_crawler=debug
// =============================================================================

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_telemetry(verbose: bool) {
    let default_filter = if verbose { "wiki_crawler=debug" } else { "wiki_crawler=info" };

    // A second init (e.g. from tests) is harmless, so its error is ignored
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
