//! Main Agora API client.

use crate::auth::AuthClient;
use crate::error::{ApiError, Result};
use crate::files::FilesClient;
use crate::posts::PostsClient;
use crate::rankings::RankingsClient;
use crate::types::ClientConfig;
use reqwest::Client;
use std::time::Duration;

/// Client for the external community API.
///
/// All business rules (authentication, scoring, persistence) live on the
/// server; this client is the credentialed transport. Authentication rides
/// on a cookie session, so the underlying HTTP client keeps a cookie jar
/// and every request is sent with credentials.
///
/// # Example
///
/// ```ignore
/// use agora_server_client::{AgoraClient, ClientConfig};
///
/// let client = AgoraClient::new(ClientConfig::new("https://example.com/api"))?;
///
/// let profile = client.auth().login("ann@example.com", "hunter2").await?;
/// let feed = client.posts().list(&Default::default()).await?;
/// println!("{} posts", feed.items.len());
/// ```
pub struct AgoraClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl AgoraClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ApiError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .cookie_store(true)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Agora/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            http,
            base_url,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// The normalized API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Authentication and account operations.
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url, self.timeout)
    }

    /// Post, comment, like, and vote operations.
    pub fn posts(&self) -> PostsClient<'_> {
        PostsClient::new(&self.http, &self.base_url, self.timeout)
    }

    /// File upload operations.
    pub fn files(&self) -> FilesClient<'_> {
        FilesClient::new(&self.http, &self.base_url, self.timeout)
    }

    /// Ranking board operations.
    pub fn rankings(&self) -> RankingsClient<'_> {
        RankingsClient::new(&self.http, &self.base_url, self.timeout)
    }
}
