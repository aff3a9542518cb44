/// Shared application state
use crate::config::GatewayConfig;

/// State shared across all gateway handlers
pub struct AppState {
    /// Upstream HTTP client for the reverse proxy
    pub http: reqwest::Client,
    pub config: GatewayConfig,
    /// Pre-rendered client configuration module
    pub defaults_module: String,
}

impl AppState {
    pub fn new(http: reqwest::Client, config: GatewayConfig, defaults_module: String) -> Self {
        Self {
            http,
            config,
            defaults_module,
        }
    }
}
