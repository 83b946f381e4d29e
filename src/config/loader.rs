//! Configuration loader

use super::Config;
use crate::error::{ForwardError, Result};
use std::path::Path;

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load configuration from a YAML string (useful for testing)
pub fn load_config_from_str(yaml: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(yaml)?;
    config.validate().map_err(ForwardError::Config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_minimal() {
        let yaml = r#"
server:
  listen_port: 9000

target:
  host: "127.0.0.1"
  port: 9001
"#;
        let config = load_config_from_str(yaml).unwrap();
        assert_eq!(config.server.listen_port, 9000);
        assert_eq!(config.server.listen_address, "0.0.0.0"); // default
        assert_eq!(config.target.host, "127.0.0.1");
        assert_eq!(config.target.port, 9001);
    }

    #[test]
    fn test_load_config_full() {
        let yaml = r#"
server:
  listen_address: "127.0.0.1"
  listen_port: 8443
  connect_timeout_secs: 10
  max_connections: 256

target:
  host: "example.com"
  port: 443
"#;
        let config = load_config_from_str(yaml).unwrap();
        assert_eq!(config.server.listen_address, "127.0.0.1");
        assert_eq!(config.server.listen_port, 8443);
        assert_eq!(config.server.connect_timeout_secs, 10);
        assert_eq!(config.server.max_connections, 256);
        assert_eq!(config.target.host, "example.com");
        assert_eq!(config.target.port, 443);
    }

    #[test]
    fn test_load_config_defaults() {
        let yaml = r#"
server:
  listen_port: 3000

target:
  host: "localhost"
  port: 8080
"#;
        let config = load_config_from_str(yaml).unwrap();
        assert_eq!(config.server.listen_address, "0.0.0.0");
        assert_eq!(config.server.connect_timeout_secs, 0);
        assert_eq!(config.server.max_connections, 0);
    }

    #[test]
    fn test_load_config_missing_target() {
        let yaml = r#"
server:
  listen_port: 9000
"#;
        let err = load_config_from_str(yaml).unwrap_err();
        assert!(matches!(err, ForwardError::Config(_)));
    }

    #[test]
    fn test_load_config_empty_target_host() {
        let yaml = r#"
server:
  listen_port: 9000

target:
  host: ""
  port: 9001
"#;
        let err = load_config_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("Target host"));
    }

    #[test]
    fn test_load_config_zero_target_port() {
        let yaml = r#"
server:
  listen_port: 9000

target:
  host: "127.0.0.1"
  port: 0
"#;
        let err = load_config_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("Target port"));
    }

    #[test]
    fn test_config_from_args() {
        let config = Config::from_args(9000, "example.com".to_string(), 443);
        assert_eq!(config.server.listen_address, "0.0.0.0");
        assert_eq!(config.server.listen_port, 9000);
        assert_eq!(config.server.connect_timeout_secs, 0);
        assert_eq!(config.server.max_connections, 0);
        assert_eq!(config.target.host, "example.com");
        assert_eq!(config.target.port, 443);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_addr_helpers() {
        let config = Config::from_args(9000, "example.com".to_string(), 443);
        assert_eq!(config.server.listen_addr(), "0.0.0.0:9000");
        assert_eq!(config.target.addr(), "example.com:443");
    }
}
