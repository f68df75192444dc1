//! Configuration types for the phonebook system
//!
//! This module defines all configuration structures used throughout the workspace.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main phonebook configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhonebookConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Directory store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

impl PhonebookConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.server.validate()
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind (e.g., "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Create a new listener configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The `host:port` string to bind
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate the listener configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.host.is_empty() {
            return Err(crate::Error::config("Server host cannot be empty"));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Directory store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Start with the fixed seed entries
    #[serde(default = "default_seed")]
    pub seed: bool,

    /// How new entry ids are chosen
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

impl StoreConfig {
    /// Set whether the store starts with the seed entries
    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// Set the id allocation strategy
    pub fn with_id_strategy(mut self, id_strategy: IdStrategy) -> Self {
        self.id_strategy = id_strategy;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            id_strategy: IdStrategy::default(),
        }
    }
}

/// Id allocation strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Random id in a large range, redrawn on collision
    #[default]
    Random,
    /// One more than the largest id handed out so far
    Sequential,
}

impl FromStr for IdStrategy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(IdStrategy::Random),
            "sequential" => Ok(IdStrategy::Sequential),
            other => Err(crate::Error::config(format!(
                "Unknown id strategy '{}'. Supported: random, sequential",
                other
            ))),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_seed() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PhonebookConfig::new();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.socket_addr(), "0.0.0.0:3001");
        assert!(config.store.seed);
        assert_eq!(config.store.id_strategy, IdStrategy::Random);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: PhonebookConfig =
            serde_json::from_str(r#"{"store": {"id_strategy": "sequential"}}"#).unwrap();
        assert_eq!(config.store.id_strategy, IdStrategy::Sequential);
        assert!(config.store.seed);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_id_strategy_parse() {
        assert_eq!("Sequential".parse::<IdStrategy>().unwrap(), IdStrategy::Sequential);
        assert!("uuid".parse::<IdStrategy>().is_err());
    }

    #[test]
    fn test_empty_host_rejected() {
        let config = ServerConfig::new("", 3001);
        assert!(config.validate().is_err());
    }
}
