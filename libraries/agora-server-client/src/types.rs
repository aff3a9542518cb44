//! Types for Agora API requests and responses.
//!
//! Wire payloads are camelCase; numeric counters default to zero when the
//! API omits them, matching how the rendered views treat missing values.

use serde::{Deserialize, Serialize};

/// Default page size for the post feed.
pub const POST_PAGE_SIZE: u32 = 12;
/// Default page size for comment pages.
pub const COMMENT_PAGE_SIZE: u32 = 10;

/// Configuration for connecting to the community API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (origin + prefix, e.g. "https://example.com/api")
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Create a new config with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: agora_core::defaults::DEFAULT_TIMEOUT_MS,
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Build a config from the shared client defaults.
    pub fn from_defaults(defaults: &agora_core::ClientDefaults) -> Self {
        Self {
            base_url: defaults.api_base.clone(),
            timeout_ms: defaults.timeout_ms,
        }
    }
}

// =============================================================================
// Account Types
// =============================================================================

/// Request body for account creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub nickname: String,
    pub email: String,
    pub password: String,
}

/// Request body for profile updates.
///
/// Optional fields are omitted from the payload entirely when unset.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub nickname: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_id: Option<i64>,
}

// =============================================================================
// Post Types
// =============================================================================

/// Feed ordering accepted by the posts endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    /// Newest first
    #[default]
    Latest,
    /// Most liked first
    Popular,
    /// Most commented first
    Commented,
    /// Most viewed first
    Views,
}

impl PostSort {
    /// The query-parameter value the API expects.
    pub fn as_param(self) -> &'static str {
        match self {
            PostSort::Latest => "latest",
            PostSort::Popular => "likes",
            PostSort::Commented => "comments",
            PostSort::Views => "views",
        }
    }
}

/// Query for a page of the post feed.
#[derive(Debug, Clone)]
pub struct PostListQuery {
    /// Cursor from the previous page, `None` for the first page
    pub cursor_id: Option<i64>,
    /// Page size
    pub size: u32,
    /// Feed ordering
    pub sort: PostSort,
}

impl Default for PostListQuery {
    fn default() -> Self {
        Self {
            cursor_id: None,
            size: POST_PAGE_SIZE,
            sort: PostSort::default(),
        }
    }
}

/// A post as it appears in the feed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author_nickname: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub reply_count: i64,
}

/// One page of the post feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    #[serde(default)]
    pub items: Vec<PostSummary>,
    #[serde(default)]
    pub next_cursor: Option<i64>,
    #[serde(default)]
    pub has_next: bool,
}

/// Post author as embedded in the detail payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAuthor {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nickname: String,
}

/// A full post as returned by the detail endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: Option<PostAuthor>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub reply_count: i64,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub file_urls: Vec<String>,
}

/// Request body for creating a post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub file_ids: Vec<i64>,
}

/// Request body for updating a post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_ids: Option<Vec<i64>>,
}

/// Response from post creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPost {
    pub id: i64,
}

// =============================================================================
// Comment Types
// =============================================================================

/// A comment on a post.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default)]
    pub author_nickname: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One page of a post's comments.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    #[serde(default)]
    pub items: Vec<Comment>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

// =============================================================================
// Reaction Types
// =============================================================================

/// Like state of a post after a like/unlike call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub like_count: i64,
}

/// Vote state of a post after casting a vote.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteStatus {
    #[serde(default)]
    pub option: String,
    #[serde(default)]
    pub vote_count: i64,
}

// =============================================================================
// File Types
// =============================================================================

/// Response from a file upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedFile {
    pub id: i64,
    #[serde(default)]
    pub url: Option<String>,
}

// =============================================================================
// Ranking Types
// =============================================================================

/// The caller's own vote score.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteScore {
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub total_votes: i64,
    #[serde(default)]
    pub correct_votes: i64,
}

/// One row of the ranking board.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub total_votes: i64,
    #[serde(default)]
    pub correct_votes: i64,
}
