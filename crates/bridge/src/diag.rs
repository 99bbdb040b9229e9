//! Per-relay diagnostics.

/// Log a relay step at INFO when the relay is verbose, at DEBUG otherwise
macro_rules! diag {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            ::tracing::info!($($arg)+)
        } else {
            ::tracing::debug!($($arg)+)
        }
    };
}
