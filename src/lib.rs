//! portshuttle - TCP port forwarder
//!
//! This library provides the core functionality for a TCP port forwarder
//! that:
//! - Listens on a local port and accepts client connections
//! - Dials a fixed forward target for every accepted connection
//! - Relays bytes transparently in both directions until either side closes
//!
//! It is protocol agnostic: bytes are forwarded unmodified, with no framing,
//! inspection, or buffering beyond the copy buffer.

#[macro_use]
mod logging;

pub mod config;
pub mod error;
pub mod server;

pub use config::Config;
pub use error::{ForwardError, Result};
pub use server::{Listener, ListenerStats, Session};
