//! Tracing initialization and subscriber setup.

use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when none is configured.
const DEFAULT_LEVEL: &str = "info";

/// Installs a global subscriber that writes formatted events to stderr.
///
/// Idempotent: only the first call in a process takes effect, and a
/// subscriber installed by the host is left in place. An unparsable
/// `trace_level` falls back to `"info"`.
///
/// # Example
///
/// ```rust
/// use directory_page::observability::init_tracing;
/// use directory_page::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true),
    );

    let _ = subscriber.try_init();
}
