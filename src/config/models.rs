// src/config/models.rs
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Max number of pending connections queued by the OS before accept.
pub const DEFAULT_BACKLOG: i32 = 5;

/// Max size of a single read from a socket, in bytes.
pub const DEFAULT_MAX_DATA_SIZE: usize = 1024;

/// Text encoding for socket payloads.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Localhost
pub const LOCALHOST: &str = "127.0.0.1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listener: ListenerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenerConfig {
    /// Numeric IP or resolvable hostname to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port; 0 requests an OS-assigned ephemeral port.
    pub port: u16,
    /// Listen queue depth.
    #[serde(default = "default_backlog")]
    pub backlog: i32,
    /// Reserved for the read path; no consumer in this crate yet.
    #[serde(default = "default_max_data_size")]
    pub max_data_size: usize,
    /// Reserved for the read/write path; no consumer in this crate yet.
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

fn default_host() -> String {
    LOCALHOST.to_string()
}

fn default_backlog() -> i32 {
    DEFAULT_BACKLOG
}

fn default_max_data_size() -> usize {
    DEFAULT_MAX_DATA_SIZE
}

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: 0,
            backlog: default_backlog(),
            max_data_size: default_max_data_size(),
            encoding: default_encoding(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.listener.validate()
    }
}

impl ListenerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            bail!("listener.host must not be empty");
        }
        if self.backlog < 1 {
            bail!("listener.backlog must be at least 1");
        }
        if self.max_data_size == 0 {
            bail!("listener.max_data_size must be nonzero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_applied_when_fields_omitted() {
        let config: Config = serde_yaml::from_str("listener:\n  port: 4242\n").unwrap();
        assert_eq!(config.listener.host, LOCALHOST);
        assert_eq!(config.listener.port, 4242);
        assert_eq!(config.listener.backlog, DEFAULT_BACKLOG);
        assert_eq!(config.listener.max_data_size, DEFAULT_MAX_DATA_SIZE);
        assert_eq!(config.listener.encoding, DEFAULT_ENCODING);
    }

    #[test]
    fn out_of_range_port_is_rejected_at_parse() {
        let result = serde_yaml::from_str::<Config>("listener:\n  port: 70000\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_zero_backlog() {
        let config = Config {
            listener: ListenerConfig {
                backlog: 0,
                ..Default::default()
            },
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_host() {
        let config = Config {
            listener: ListenerConfig {
                host: String::new(),
                ..Default::default()
            },
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_max_data_size() {
        let config = Config {
            listener: ListenerConfig {
                max_data_size: 0,
                ..Default::default()
            },
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_config_passes_validation() {
        let config = Config {
            listener: ListenerConfig::default(),
        };
        assert!(config.validate().is_ok());
    }

    proptest! {
        #[test]
        fn any_u16_port_parses(port in 0u16..=65535) {
            let yaml = format!("listener:\n  port: {port}\n");
            let config: Config = serde_yaml::from_str(&yaml).unwrap();
            prop_assert_eq!(config.listener.port, port);
        }
    }
}
