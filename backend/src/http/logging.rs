//! Log filter setup for the server binary.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Build the subscriber filter from a `RUST_LOG`-style directive string.
///
/// Accepts per-target directives such as `cropwatch=debug,tower_http=warn`.
/// Falls back to [`DEFAULT_LOG_FILTER`] when `directives` is absent or does
/// not parse.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    match directives.map(EnvFilter::try_new) {
        Some(Ok(filter)) => filter,
        Some(Err(e)) => {
            eprintln!("Ignoring invalid RUST_LOG: {}", e);
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }
        None => EnvFilter::new(DEFAULT_LOG_FILTER),
    }
}
