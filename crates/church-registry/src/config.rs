//! Layered application configuration.
//!
//! Precedence: built-in defaults, then the YAML file (when given), then
//! `APP__`-prefixed environment variables, then CLI overrides.

use std::path::Path;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub enable_docs: bool,
    /// Expose storage-level constraint detail in conflict responses
    /// (development only).
    pub expose_internal_errors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_owned(),
            enable_docs: true,
            expose_internal_errors: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DatabaseConfig {
    pub dsn: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: "sqlite://registry.db?mode=rwc".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AuthConfig {
    /// Bearer token required on every `/api` request. Unset means the
    /// server runs open (development).
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed("APP__").split("__"))
            .extract()
            .context("failed to load configuration")
    }

    /// CLI port override keeps the configured host.
    pub fn override_port(&mut self, port: u16) {
        if let Some((host, _)) = self.server.bind_addr.rsplit_once(':') {
            self.server.bind_addr = format!("{host}:{port}");
        }
    }

    pub fn to_pretty_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to render configuration")
    }
}
