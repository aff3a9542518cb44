//! Client configuration defaults.
//!
//! The gateway resolves these values at startup and publishes them to the
//! browser as a generated `defaults.js` module; the native client uses the
//! same resolution for its own defaults. Recognized environment overrides
//! are `APP_NAME`, `API_BASE`, and `TIMEOUT_MS`.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Built-in display name.
pub const DEFAULT_APP_NAME: &str = "MyCommunity";
/// Built-in API origin + prefix.
pub const DEFAULT_API_BASE: &str = "https://api.community.junbeom.site/api";
/// Built-in request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Configuration values shared between the gateway and the client.
///
/// Serialized field names match the generated JavaScript module, so the
/// struct round-trips through `defaults.js` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDefaults {
    /// Display name of the application
    #[serde(rename = "APP_NAME")]
    pub app_name: String,

    /// Base URL of the external API (origin + prefix)
    #[serde(rename = "API_BASE")]
    pub api_base: String,

    /// Request timeout in milliseconds
    #[serde(rename = "TIMEOUT_MS")]
    pub timeout_ms: u64,
}

impl Default for ClientDefaults {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientDefaults {
    /// Resolve the defaults from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve the defaults through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. A `TIMEOUT_MS` that does not
    /// parse as an integer falls back to the built-in default rather than
    /// failing startup.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let timeout_ms = match non_empty("TIMEOUT_MS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "TIMEOUT_MS is not an integer, using default");
                DEFAULT_TIMEOUT_MS
            }),
            None => DEFAULT_TIMEOUT_MS,
        };

        Self {
            app_name: non_empty("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            api_base: non_empty("API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            timeout_ms,
        }
    }
}
