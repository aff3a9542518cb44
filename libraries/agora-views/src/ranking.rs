//! Ranking board: the viewer's score and the top entries.

use crate::error::{Result, ViewError};
use crate::format;
use agora_server_client::AgoraClient;
use agora_session::SessionStore;
use std::sync::Arc;
use tracing::warn;

const RANKING_LIMIT: u32 = 20;

/// The viewer's own score shaped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSummary {
    pub score: String,
    pub total_votes: String,
    pub correct_votes: String,
    pub accuracy: String,
}

/// One row of the board shaped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    pub rank: usize,
    pub nickname: String,
    pub score: String,
    pub accuracy: String,
}

/// The whole ranking screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingView {
    /// `None` when the viewer's score could not be fetched; the board is
    /// still shown.
    pub my_score: Option<ScoreSummary>,
    pub rows: Vec<RankingRow>,
}

/// Controller for the ranking screen.
///
/// Requires a signed-in viewer. The personal score and the board are
/// fetched concurrently; a personal-score failure is logged and tolerated,
/// a board failure fails the screen.
pub struct RankingController {
    client: Arc<AgoraClient>,
    session: SessionStore,
}

impl RankingController {
    pub fn new(client: Arc<AgoraClient>, session: SessionStore) -> Self {
        Self { client, session }
    }

    pub async fn load(&self) -> Result<RankingView> {
        if self.session.current_user().is_none() {
            return Err(ViewError::needs_login(
                "Please sign in to see the rankings.",
            ));
        }

        let rankings = self.client.rankings();
        let (my_score, board) = tokio::join!(
            rankings.my_vote_score(),
            rankings.list(RANKING_LIMIT),
        );

        let my_score = match my_score {
            Ok(score) => Some(ScoreSummary {
                score: format::format_count(score.score),
                total_votes: format::format_count(score.total_votes),
                correct_votes: format::format_count(score.correct_votes),
                accuracy: format::accuracy_percent(score.correct_votes, score.total_votes),
            }),
            Err(err) => {
                warn!(error = %err, "Could not load the viewer's vote score");
                None
            }
        };

        let entries = board.map_err(|err| {
            warn!(error = %err, "Failed to load rankings");
            ViewError::from_api(&err, "Could not load the rankings.")
        })?;

        let rows = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| RankingRow {
                rank: index + 1,
                nickname: if entry.nickname.is_empty() {
                    "Anonymous".to_string()
                } else {
                    entry.nickname
                },
                score: format::format_count(entry.score),
                accuracy: format::accuracy_percent(entry.correct_votes, entry.total_votes),
            })
            .collect();

        Ok(RankingView { my_score, rows })
    }
}
