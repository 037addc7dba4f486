//! Server configuration: YAML file merged with `TOLLGATE__` environment variables.

use std::net::SocketAddr;
use std::path::Path;

use authn_resolver::AuthNResolverConfig;
use field_areas::FieldAreasConfig;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;
use static_directory_plugin::StaticDirectoryConfig;
use tollgate_token::TokenConfig;

/// Prefix of environment overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "TOLLGATE__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub token: TokenConfig,
    pub authn: AuthNResolverConfig,
    pub directory: StaticDirectoryConfig,
    pub field_areas: FieldAreasConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8087)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
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
    /// Load from `path` (when given) and the environment.
    ///
    /// # Errors
    ///
    /// Fails on unreadable YAML, unknown keys or values of the wrong type.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            anyhow::ensure!(path.exists(), "config file {} not found", path.display());
            figment = figment.merge(Yaml::file(path));
        }
        let config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }
}
