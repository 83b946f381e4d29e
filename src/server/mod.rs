//! Server module for portshuttle
//!
//! This module contains:
//! - TCP listener and accept loop
//! - Per-connection forwarding session
//! - One-directional byte shuttle

pub mod listener;
pub mod session;
pub mod shuttle;

pub use listener::{Listener, ListenerStats};
pub use session::Session;
pub use shuttle::shuttle;
