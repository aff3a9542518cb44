//! Agora Server Client
//!
//! HTTP client library for the external community API.
//!
//! # Features
//!
//! - **Authentication**: cookie-credentialed login/logout, profile fetch
//!   and update, signup, account deletion
//! - **Posts**: cursor-paginated feed, detail, create/update/delete
//! - **Comments**: page-based listing and CRUD
//! - **Reactions**: like/unlike and voting
//! - **Files**: multipart upload
//! - **Rankings**: board listing and the caller's vote score
//!
//! Every request carries an explicit timeout; on expiry the request is
//! aborted and surfaces as [`ApiError::Timeout`]. A 401 surfaces as
//! [`ApiError::AuthRequired`] so the session layer can treat it as an
//! authoritative sign-out.
//!
//! # Example
//!
//! ```ignore
//! use agora_server_client::{AgoraClient, ClientConfig, PostListQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AgoraClient::new(ClientConfig::new("https://example.com/api"))?;
//!
//!     let profile = client.auth().login("ann@example.com", "hunter2").await?;
//!     println!("logged in: {}", profile["nickname"]);
//!
//!     let feed = client.posts().list(&PostListQuery::default()).await?;
//!     println!("{} posts on the first page", feed.items.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod files;
mod posts;
mod rankings;
mod types;

// Re-export main types
pub use client::AgoraClient;
pub use error::{ApiError, Result};
pub use types::{
    ClientConfig, Comment, CommentPage, CreatedPost, LikeStatus, NewAccount, NewPost, Post,
    PostAuthor, PostListQuery, PostPage, PostSort, PostSummary, PostUpdate, ProfileUpdate,
    RankingEntry, UploadedFile, VoteScore, VoteStatus, COMMENT_PAGE_SIZE, POST_PAGE_SIZE,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use files::FilesClient;
pub use posts::PostsClient;
pub use rankings::RankingsClient;
