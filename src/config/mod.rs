//! Configuration module for portshuttle
//!
//! The forwarder takes a listen address/port and a single fixed forward
//! target:
//!
//! ```yaml
//! server:
//!   listen_address: "0.0.0.0"
//!   listen_port: 9000
//!
//! target:
//!   host: "127.0.0.1"
//!   port: 9001
//! ```
//!
//! The same structure can be built from the CLI's positional arguments via
//! [`Config::from_args`].

mod loader;
mod types;

pub use loader::{load_config, load_config_from_str};
pub use types::*;
