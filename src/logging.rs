use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError};

/// Installs console logging for a suite run.
///
/// `RUST_LOG` wins over `default_level` when set. Only the first call in a
/// process installs anything; later calls return an error that callers can
/// ignore.
///
/// # Errors
/// Returns `TryInitError` if a global subscriber is already set.
pub fn init_tracing(default_level: &str) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
}
