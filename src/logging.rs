//! Logging macros that set target to "portshuttle" for all log calls.
//!
//! Without an explicit target, tracing uses the full module path
//! (e.g., "portshuttle::server::listener"), creating overly verbose logger
//! names. These macros ensure all logs from this crate use a single
//! "portshuttle" target.

macro_rules! trace {
    ($($arg:tt)*) => { ::tracing::trace!(target: "portshuttle", $($arg)*) };
}

macro_rules! debug {
    ($($arg:tt)*) => { ::tracing::debug!(target: "portshuttle", $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { ::tracing::info!(target: "portshuttle", $($arg)*) };
}

macro_rules! warn {
    ($($arg:tt)*) => { ::tracing::warn!(target: "portshuttle", $($arg)*) };
}

macro_rules! error {
    ($($arg:tt)*) => { ::tracing::error!(target: "portshuttle", $($arg)*) };
}
