//! Ranking board operations.

use crate::error::{transport_error, ApiError, Result};
use crate::types::{RankingEntry, VoteScore};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// The rankings endpoint has returned both shapes in the wild: a bare
/// array, and an object wrapping the array in `items`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RankingPayload {
    Bare(Vec<RankingEntry>),
    Wrapped {
        #[serde(default)]
        items: Vec<RankingEntry>,
    },
}

impl RankingPayload {
    fn into_entries(self) -> Vec<RankingEntry> {
        match self {
            RankingPayload::Bare(entries) => entries,
            RankingPayload::Wrapped { items } => items,
        }
    }
}

/// Rankings client for the community API.
pub struct RankingsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    timeout: Duration,
}

impl<'a> RankingsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, timeout: Duration) -> Self {
        Self {
            http,
            base_url,
            timeout,
        }
    }

    /// Fetch the top entries of the ranking board.
    pub async fn list(&self, limit: u32) -> Result<Vec<RankingEntry>> {
        let url = format!("{}/rankings", self.base_url);
        debug!(url = %url, limit, "Fetching rankings");

        let response = self
            .http
            .get(&url)
            .query(&[("limit", limit.to_string())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            let payload: RankingPayload = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse rankings response: {}", e))
            })?;
            let entries = payload.into_entries();
            debug!(entries = entries.len(), "Fetched rankings");
            Ok(entries)
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

    /// Fetch the caller's own vote score.
    pub async fn my_vote_score(&self) -> Result<VoteScore> {
        let url = format!("{}/users/me/vote-score", self.base_url);
        debug!(url = %url, "Fetching vote score");

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            let score: VoteScore = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse vote score response: {}", e))
            })?;
            Ok(score)
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
