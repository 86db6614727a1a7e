use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber shared by the server binary and tests.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info`
/// - Writes compact lines to stdout so container logs stay on one stream
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(|| io::stdout())
        .try_init();
}
