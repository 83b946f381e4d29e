//! Configuration types

use serde::Deserialize;

/// Root configuration structure
///
/// # Example
///
/// ```yaml
/// server:
///   listen_address: "0.0.0.0"
///   listen_port: 9000
///
/// target:
///   host: "127.0.0.1"
///   port: 9001
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Forward target configuration
    pub target: TargetConfig,
}

impl Config {
    /// Build a configuration from the CLI's positional arguments.
    ///
    /// Everything not expressible on the command line keeps its default.
    pub fn from_args(listen_port: u16, forward_host: String, forward_port: u16) -> Self {
        Self {
            server: ServerConfig {
                listen_address: default_listen_address(),
                listen_port,
                connect_timeout_secs: 0,
                max_connections: 0,
            },
            target: TargetConfig {
                host: forward_host,
                port: forward_port,
            },
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.target.host.is_empty() {
            return Err("Target host must not be empty".to_string());
        }
        if self.target.port == 0 {
            return Err("Target port must not be 0".to_string());
        }
        Ok(())
    }
}

/// Server listener configuration
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
    /// Port to listen on (0 = OS-assigned)
    pub listen_port: u16,
    /// Dial timeout in seconds for the forward target (0 = no timeout)
    #[serde(default)]
    pub connect_timeout_secs: u64,
    /// Maximum number of concurrent connections (0 = unlimited)
    #[serde(default)]
    pub max_connections: usize,
}

impl ServerConfig {
    /// The "address:port" string the listener binds.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_address, self.listen_port)
    }
}

/// Forward target configuration
///
/// Fixed at startup; every accepted connection is relayed to this host:port.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Target host or IP
    pub host: String,
    /// Target port
    pub port: u16,
}

impl TargetConfig {
    /// The "host:port" string each session dials.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_listen_address() -> String {
    "0.0.0.0".to_string()
}
