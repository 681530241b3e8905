//! Logging utilities for the control bridge
//!
//! Lightweight tracing around the probe and the per-call marshal paths.
//! Uses `tracing` for structured logging with minimal overhead. Errors are
//! never logged here - they propagate to the caller untouched.

// Re-export tracing macros for use throughout the crate
pub use tracing::{debug, error, info, trace, warn};

/// Initialize bridge logging with sensible defaults
///
/// Safe to call more than once; later calls are no-ops. For release
/// builds, logs at INFO level and above are enabled; debug builds also
/// enable DEBUG and TRACE.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            EnvFilter::new("malloc_tools=debug")
        }
        #[cfg(not(debug_assertions))]
        {
            EnvFilter::new("malloc_tools=info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .ok(); // Ignore error if already initialized
}

/// Log the one-shot capability probe outcome
#[inline]
pub(crate) fn log_probe(found: bool) {
    debug!(
        target: "probe",
        found,
        "control interface probe"
    );
}

/// Log a read-mode native call
#[inline]
pub(crate) fn log_read(key: &str) {
    trace!(target: "ctl", key, "read");
}

/// Log a write-mode native call
#[inline]
pub(crate) fn log_write(key: &str) {
    trace!(target: "ctl", key, "write");
}

/// Log a fire-and-forget command
#[inline]
pub(crate) fn log_command(key: &str) {
    trace!(target: "ctl", key, "command");
}
