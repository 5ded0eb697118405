//! Log setup shared by the binaries.

use tracing_subscriber::{
    EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install a human-readable stdout logger.
///
/// Logs at `info` and above, or `debug` and above when `verbose` is set. A
/// `RUST_LOG` directive, if present, narrows this further.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        filter::LevelFilter::DEBUG
    } else {
        filter::LevelFilter::INFO
    };

    let stdout_log = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(EnvFilter::try_from_default_env().ok())
        .init();
}
