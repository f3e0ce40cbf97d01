//! Tracing/logging setup shared by every process embedding the billing layer.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::{LogFormat, LogSettings};

/// Initialize process-wide tracing from `RUST_LOG` with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&LogSettings::default());
}

/// Initialize process-wide tracing with explicit settings.
pub fn init_with(settings: &LogSettings) {
    tracing::init(settings);
}
