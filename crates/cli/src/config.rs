//! Configuration loading and management

use anyhow::{Context, Result, bail};
use halal_check_adapters::gateway::{OpenFoodFactsConfig, OpenFoodFactsGateway, StubProductGateway};
use halal_check_adapters::open_food_facts::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use halal_check_domain::ProductGateway;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Environment variable that overrides `server.port`
pub const PORT_ENV: &str = "PORT";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// open_food_facts or stub
    #[serde(default = "default_provider_kind")]
    pub kind: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_provider_kind() -> String {
    "open_food_facts".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
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

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_provider_kind(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ServerConfig {
    /// Socket address to bind
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid server host: {}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl ProviderConfig {
    /// Build the product gateway this configuration selects
    pub fn build_gateway(&self) -> Result<Arc<dyn ProductGateway>> {
        match self.kind.as_str() {
            "open_food_facts" => {
                if self.timeout_secs == 0 {
                    bail!("provider.timeout_secs must be greater than zero");
                }
                let gateway = OpenFoodFactsGateway::with_config(OpenFoodFactsConfig {
                    base_url: self.base_url.clone(),
                    timeout: Duration::from_secs(self.timeout_secs),
                    user_agent: self.user_agent.clone(),
                })
                .context("Failed to initialize Open Food Facts gateway")?;
                Ok(Arc::new(gateway))
            }
            "stub" => Ok(Arc::new(StubProductGateway::with_samples())),
            other => bail!("Unknown provider kind: {} (expected open_food_facts or stub)", other),
        }
    }
}

/// Parse a raw `PORT` value; unset, empty or blank means no override
fn port_override(raw: Option<String>) -> Result<Option<u16>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let port = trimmed
        .parse()
        .with_context(|| format!("Invalid {} value: {}", PORT_ENV, raw))?;
    Ok(Some(port))
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            bail!("Config file not found: {}", path.display());
        }

        builder = builder.add_source(
            config::Environment::with_prefix("HALAL_CHECK")
                .separator("__")
                .try_parsing(true),
        );

        // Bare PORT wins over file and prefixed env
        if let Some(port) = port_override(std::env::var(PORT_ENV).ok())? {
            builder = builder
                .set_override("server.port", i64::from(port))
                .context("Failed to apply PORT override")?;
        }

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# halal-check configuration

[general]
log_level = "info"

[server]
host = "0.0.0.0"
# The PORT environment variable overrides this value
port = 3000

[provider]
kind = "open_food_facts"  # open_food_facts, stub
base_url = "https://world.openfoodfacts.org"
timeout_secs = 8
# user_agent = "halal-check/0.1.0"
"#
        .to_string()
    }
}
