/// Gateway configuration
use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_static_files")]
    pub static_files: StaticFileSettings,

    #[serde(default = "default_proxy")]
    pub proxy: ProxySettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticFileSettings {
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxySettings {
    /// Path prefix forwarded to the backend origin
    #[serde(default = "default_proxy_prefix")]
    pub prefix: String,

    /// Backend origin requests are forwarded to
    #[serde(default = "default_proxy_target")]
    pub target: String,

    #[serde(default = "default_proxy_timeout_secs")]
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Load configuration from file and environment.
    ///
    /// Besides the `AGORA_`-prefixed variables, the two classic overrides
    /// `PORT` and `PAGES_PROXY_TARGET` are recognized bare.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("config.toml"));
        if path.exists() {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("AGORA")
                .separator("_")
                .try_parsing(true),
        );

        let built = settings
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let mut loaded: GatewayConfig = built
            .try_deserialize()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.trim().parse() {
                loaded.server.port = port;
            }
        }
        if let Ok(target) = std::env::var("PAGES_PROXY_TARGET") {
            if !target.is_empty() {
                loaded.proxy.target = target;
            }
        }

        Ok(loaded)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let target = url::Url::parse(&self.proxy.target)
            .map_err(|e| GatewayError::Config(format!("Invalid proxy target: {}", e)))?;
        if target.scheme() != "http" && target.scheme() != "https" {
            return Err(GatewayError::Config(format!(
                "Proxy target must be http(s), got {}",
                target.scheme()
            )));
        }

        if !self.proxy.prefix.starts_with('/') {
            return Err(GatewayError::Config(
                "Proxy prefix must start with '/'".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_files() -> StaticFileSettings {
    StaticFileSettings {
        public_dir: default_public_dir(),
        assets_dir: default_assets_dir(),
    }
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_proxy() -> ProxySettings {
    ProxySettings {
        prefix: default_proxy_prefix(),
        target: default_proxy_target(),
        timeout_secs: default_proxy_timeout_secs(),
    }
}

fn default_proxy_prefix() -> String {
    "/pages".to_string()
}

fn default_proxy_target() -> String {
    "http://localhost:8080".to_string()
}

fn default_proxy_timeout_secs() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            static_files: default_static_files(),
            proxy: default_proxy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_setup() {
        let config = GatewayConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.proxy.prefix, "/pages");
        assert_eq!(config.proxy.target, "http://localhost:8080");
        assert_eq!(config.proxy.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_proxy_targets() {
        let mut config = GatewayConfig::default();
        config.proxy.target = "not a url".to_string();
        assert!(config.validate().is_err());

        config.proxy.target = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_relative_prefix() {
        let mut config = GatewayConfig::default();
        config.proxy.prefix = "pages".to_string();
        assert!(config.validate().is_err());
    }
}
