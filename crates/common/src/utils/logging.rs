use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize a compact tracing subscriber writing to stdout.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize a JSON tracing subscriber for container log collectors.
/// Repository and service events are at `info` by default; raise with
/// e.g. `RUST_LOG=info,service::product=debug`.
pub fn init_logging_json() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .json()
        .with_writer(io::stdout)
        .try_init();
}
