//! Configuration loading and management

use crate::lookup::LookupSettings;
use crate::lookup::http::{DEFAULT_POSTAL_CODE_BASE_URL, DEFAULT_TAX_ID_BASE_URL};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for the listener
    ///
    /// The host may be a hostname, an IPv4 literal or a bare IPv6 literal;
    /// IPv6 hosts are bracketed.
    pub fn listen_addr(&self) -> String {
        let host = self.host.trim();
        if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]:{}", self.port)
        } else {
            format!("{host}:{}", self.port)
        }
    }
}

/// Which [`CustomerStore`](crate::core::service::CustomerStore) backs the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Process-local map, lost on restart
    #[default]
    InMemory,

    /// PostgreSQL, requires the `postgres` feature
    Postgres { url: String },
}

/// Registry lookup settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupConfig {
    #[serde(default = "default_tax_id_base_url")]
    pub tax_id_base_url: String,

    #[serde(default = "default_postal_code_base_url")]
    pub postal_code_base_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            tax_id_base_url: default_tax_id_base_url(),
            postal_code_base_url: default_postal_code_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl LookupConfig {
    pub fn settings(&self) -> LookupSettings {
        LookupSettings {
            tax_id_base_url: self.tax_id_base_url.clone(),
            postal_code_base_url: self.postal_code_base_url.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

/// Complete service configuration
///
/// Every section is optional; an empty document yields the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub lookup: LookupConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml).context("Invalid configuration")?;
        Ok(config)
    }

    /// Apply `PORT` and `DATABASE_URL` overrides
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`. A `DATABASE_URL`
    /// switches storage to PostgreSQL.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{port}'"))?;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            self.storage = StorageConfig::Postgres { url };
        }
        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_tax_id_base_url() -> String {
    DEFAULT_TAX_ID_BASE_URL.to_string()
}

fn default_postal_code_base_url() -> String {
    DEFAULT_POSTAL_CODE_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}
