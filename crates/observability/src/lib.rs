//! Tracing/logging setup shared by every binary in the workspace.

/// Initialize process-wide logging with the format chosen by
/// `FRIDGECHEF_LOG_FORMAT` (`json` by default, `pretty` for humans).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::LogFormat;
