//! Post, comment, like, and vote operations.

use crate::error::{transport_error, ApiError, Result};
use crate::types::{
    Comment, CommentPage, CreatedPost, LikeStatus, NewPost, Post, PostListQuery, PostPage,
    PostUpdate, VoteStatus,
};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Posts client for the community API.
pub struct PostsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    timeout: Duration,
}

impl<'a> PostsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, timeout: Duration) -> Self {
        Self {
            http,
            base_url,
            timeout,
        }
    }

    /// Fetch one page of the post feed.
    pub async fn list(&self, query: &PostListQuery) -> Result<PostPage> {
        let url = format!("{}/posts", self.base_url);

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(cursor) = query.cursor_id {
            params.push(("cursorId", cursor.to_string()));
        }
        params.push(("size", query.size.to_string()));
        params.push(("sort", query.sort.as_param().to_string()));

        debug!(url = %url, sort = query.sort.as_param(), cursor = ?query.cursor_id, "Fetching post feed");

        let response = self
            .http
            .get(&url)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            let page: PostPage = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse feed response: {}", e))
            })?;
            debug!(
                items = page.items.len(),
                has_next = page.has_next,
                "Fetched feed page"
            );
            Ok(page)
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

    /// Fetch a single post by id.
    pub async fn get(&self, post_id: i64) -> Result<Post> {
        let url = format!("{}/posts/{}", self.base_url, post_id);
        debug!(url = %url, post_id, "Fetching post");

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            let post: Post = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse post response: {}", e))
            })?;
            Ok(post)
        } else if status.as_u16() == 401 {
            Err(ApiError::AuthRequired)
        } else if status.as_u16() == 404 {
            Err(ApiError::Server {
                status: 404,
                message: format!("Post not found: {}", post_id),
            })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::Server {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Create a post.
    pub async fn create(&self, post: &NewPost) -> Result<CreatedPost> {
        let url = format!("{}/posts", self.base_url);
        debug!(url = %url, title = %post.title, files = post.file_ids.len(), "Creating post");

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(post)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            let created: CreatedPost = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse create response: {}", e))
            })?;
            debug!(post_id = created.id, "Post created");
            Ok(created)
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

    /// Update a post.
    pub async fn update(&self, post_id: i64, update: &PostUpdate) -> Result<()> {
        let url = format!("{}/posts/{}", self.base_url, post_id);
        debug!(url = %url, post_id, "Updating post");

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

    /// Delete a post.
    pub async fn delete(&self, post_id: i64) -> Result<()> {
        let url = format!("{}/posts/{}", self.base_url, post_id);
        debug!(url = %url, post_id, "Deleting post");

        let response = self
            .http
            .delete(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            debug!(post_id, "Post deleted");
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

    /// Fetch one page of a post's comments.
    pub async fn comments(&self, post_id: i64, page: u32, size: u32) -> Result<CommentPage> {
        let url = format!("{}/posts/{}/comments", self.base_url, post_id);
        debug!(url = %url, post_id, page, "Fetching comments");

        let response = self
            .http
            .get(&url)
            .query(&[("page", page.to_string()), ("size", size.to_string())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            let comments: CommentPage = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse comments response: {}", e))
            })?;
            Ok(comments)
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

    /// Add a comment to a post.
    pub async fn create_comment(&self, post_id: i64, content: &str) -> Result<Comment> {
        let url = format!("{}/posts/{}/comments", self.base_url, post_id);
        debug!(url = %url, post_id, "Creating comment");

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(&json!({ "content": content }))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            let comment: Comment = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse comment response: {}", e))
            })?;
            Ok(comment)
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

    /// Replace a comment's content.
    pub async fn update_comment(&self, comment_id: i64, content: &str) -> Result<Comment> {
        let url = format!("{}/comments/{}", self.base_url, comment_id);
        debug!(url = %url, comment_id, "Updating comment");

        let response = self
            .http
            .put(&url)
            .timeout(self.timeout)
            .json(&json!({ "content": content }))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            let comment: Comment = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse comment response: {}", e))
            })?;
            Ok(comment)
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

    /// Delete a comment.
    pub async fn delete_comment(&self, comment_id: i64) -> Result<()> {
        let url = format!("{}/comments/{}", self.base_url, comment_id);
        debug!(url = %url, comment_id, "Deleting comment");

        let response = self
            .http
            .delete(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
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

    /// Like a post. Returns the post's new like state.
    pub async fn like(&self, post_id: i64) -> Result<LikeStatus> {
        self.send_like(post_id, true).await
    }

    /// Remove a like from a post. Returns the post's new like state.
    pub async fn unlike(&self, post_id: i64) -> Result<LikeStatus> {
        self.send_like(post_id, false).await
    }

    async fn send_like(&self, post_id: i64, like: bool) -> Result<LikeStatus> {
        let url = format!("{}/posts/{}/likes", self.base_url, post_id);
        debug!(url = %url, post_id, like, "Toggling like");

        let request = if like {
            self.http.post(&url)
        } else {
            self.http.delete(&url)
        };

        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            let like_status: LikeStatus = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse like response: {}", e))
            })?;
            Ok(like_status)
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

    /// Cast a vote on a post.
    pub async fn vote(&self, post_id: i64, option: &str) -> Result<VoteStatus> {
        let url = format!("{}/posts/{}/vote", self.base_url, post_id);
        debug!(url = %url, post_id, option, "Casting vote");

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(&json!({ "option": option }))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            let vote: VoteStatus = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse vote response: {}", e))
            })?;
            Ok(vote)
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
