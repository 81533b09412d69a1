//! Tracing and logging (shared setup).

/// Initialize process-wide observability with JSON logs.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::Json);
}

/// Initialize process-wide observability with the given output format.
pub fn init_with(format: LogFormat) {
    tracing::init(format);
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Compact,
}

/// Tracing configuration (filters, layers).
pub mod tracing;
