//! Subscriber setup for the storefront process.
//!
//! Output goes through `RUST_LOG` (default `info`). Broker traffic is logged
//! under `shopfront::events` at `debug` and rendered views under
//! `shopfront::render`, so the target is always printed.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::SystemTime;

pub const DEFAULT_FILTER: &str = "info";

/// Line format of the log output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, with timestamps.
    #[default]
    Json,
    /// Single-line human-readable output.
    Compact,
}

impl LogFormat {
    /// `SHOPFRONT_LOG_FORMAT=compact` selects [`LogFormat::Compact`];
    /// anything else, or nothing, is JSON.
    pub fn from_env() -> Self {
        Self::parse(std::env::var("SHOPFRONT_LOG_FORMAT").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("compact") => LogFormat::Compact,
            _ => LogFormat::Json,
        }
    }
}

/// Install the global subscriber in the format chosen by the environment.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with(LogFormat::from_env());
}

pub fn init_with(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let _ = match format {
        LogFormat::Json => builder.json().with_timer(SystemTime).try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}
