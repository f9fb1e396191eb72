use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::record::ServiceName;

/// Which of the four services this process runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Sender,
    Middleware,
    Receiver,
    Collector,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sender => "sender",
            Self::Middleware => "middleware",
            Self::Receiver => "receiver",
            Self::Collector => "collector",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::Sender => 3000,
            Self::Middleware => 3001,
            Self::Receiver => 3002,
            Self::Collector => 3003,
        }
    }

    /// Service name used on emitted log records. The collector does not
    /// emit records about itself.
    pub fn service_name(&self) -> Option<ServiceName> {
        match self {
            Self::Sender => Some(ServiceName::Sender),
            Self::Middleware => Some(ServiceName::Middleware),
            Self::Receiver => Some(ServiceName::Receiver),
            Self::Collector => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Self::Development
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub environment: Environment,
    pub endpoints: EndpointsConfig,
    pub collector: CollectorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            environment: Environment::default(),
            endpoints: EndpointsConfig::default(),
            collector: CollectorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// Overrides the role's default port when set.
    pub port: Option<u16>,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: None,
            log_level: "info".to_string(),
        }
    }
}

/// Endpoint sets per environment; the active one is selected by
/// `environment`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub development: EndpointSet,
    pub production: EndpointSet,
}

/// Base URLs the chained services call out to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSet {
    pub middleware: String,
    pub receiver: String,
    pub collector: String,
}

impl Default for EndpointSet {
    fn default() -> Self {
        Self {
            middleware: "http://localhost:3001/process".to_string(),
            receiver: "http://localhost:3002/process".to_string(),
            collector: "http://localhost:3003/log-ingest".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Ring buffer capacity of the in-memory log store.
    pub capacity: usize,
    /// Depth of the fire-and-forget emission channel.
    pub emitter_queue: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            capacity: crate::store::DEFAULT_CAPACITY,
            emitter_queue: crate::emitter::DEFAULT_QUEUE_DEPTH,
        }
    }
}

impl Config {
    /// Endpoint set selected by the configured environment.
    pub fn active_endpoints(&self) -> &EndpointSet {
        match self.environment {
            Environment::Development => &self.endpoints.development,
            Environment::Production => &self.endpoints.production,
        }
    }
}

/// Load configuration from an optional TOML file layered with
/// `TRACELINK`-prefixed environment variables.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("TRACELINK").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    let endpoints = cfg.active_endpoints();
    if endpoints.middleware.is_empty() {
        anyhow::bail!("Middleware endpoint cannot be empty");
    }
    if endpoints.receiver.is_empty() {
        anyhow::bail!("Receiver endpoint cannot be empty");
    }
    if endpoints.collector.is_empty() {
        anyhow::bail!("Collector endpoint cannot be empty");
    }
    if cfg.collector.capacity == 0 {
        anyhow::bail!("Collector capacity must be greater than zero");
    }
    if cfg.collector.emitter_queue == 0 {
        anyhow::bail!("Emitter queue depth must be greater than zero");
    }

    Ok(())
}
