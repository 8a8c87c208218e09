use tracing_subscriber::{fmt, EnvFilter};

/// JSON logs to stdout. RUST_LOG wins over `log_filter` (LINQ_LOG).
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init(log_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter));

    let installed = fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .try_init();

    if installed.is_ok() {
        tracing::debug!(fallback_filter = %log_filter, "telemetry initialised");
    }
}
