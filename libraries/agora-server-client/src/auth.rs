//! Authentication and account operations.

use crate::error::{transport_error, ApiError, Result};
use crate::types::{NewAccount, ProfileUpdate};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Authentication client for the community API.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    timeout: Duration,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, timeout: Duration) -> Self {
        Self {
            http,
            base_url,
            timeout,
        }
    }

    /// Login with email and password.
    ///
    /// On success the session cookie is stored on the shared HTTP client
    /// and the raw profile payload is returned. The payload is raw on
    /// purpose: the session store sanitizes it at its own boundary.
    pub async fn login(&self, email: &str, password: &str) -> Result<Value> {
        let url = format!("{}/auth/login", self.base_url);
        debug!(url = %url, email = %email, "Attempting login");

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            let profile: Value = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse login response: {}", e))
            })?;
            info!("Login successful");
            Ok(profile)
        } else if status.as_u16() == 401 {
            warn!(status = %status, "Login failed: invalid credentials");
            Err(ApiError::AuthFailed(
                "Invalid email or password".to_string(),
            ))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::Server {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// End the server-side session.
    ///
    /// A 401 maps to [`ApiError::AuthRequired`]; callers treat that as
    /// already-logged-out.
    pub async fn logout(&self) -> Result<()> {
        let url = format!("{}/auth/logout", self.base_url);
        debug!(url = %url, "Logging out");

        let response = self
            .http
            .delete(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            info!("Logged out");
            Ok(())
        } else if status.as_u16() == 401 {
            Err(ApiError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::Server {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Fetch the current user's raw profile.
    pub async fn fetch_profile(&self) -> Result<Value> {
        let url = format!("{}/users/me", self.base_url);
        debug!(url = %url, "Fetching current user profile");

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            let profile: Value = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse profile response: {}", e))
            })?;
            Ok(profile)
        } else if status.as_u16() == 401 {
            Err(ApiError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::Server {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Update the current user's profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
        let url = format!("{}/users/me", self.base_url);
        debug!(url = %url, nickname = %update.nickname, "Updating profile");

        let response = self
            .http
            .put(&url)
            .timeout(self.timeout)
            .json(update)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            info!("Profile updated");
            Ok(())
        } else if status.as_u16() == 401 {
            Err(ApiError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::Server {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Create a new account.
    pub async fn signup(&self, account: &NewAccount) -> Result<()> {
        let url = format!("{}/users", self.base_url);
        debug!(url = %url, email = %account.email, "Creating account");

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(account)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            info!(nickname = %account.nickname, "Account created");
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::Server {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Permanently delete the current user's account.
    pub async fn delete_account(&self) -> Result<()> {
        let url = format!("{}/users", self.base_url);
        debug!(url = %url, "Deleting account");

        let response = self
            .http
            .delete(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            info!("Account deleted");
            Ok(())
        } else if status.as_u16() == 401 {
            Err(ApiError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::Server {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}
