//! Tracing and event diagnostics (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, output format).
pub mod tracing;

/// Broker tap that logs every event.
pub mod event_log;

pub use self::tracing::LogFormat;
