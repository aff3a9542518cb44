//! Post detail: the post itself, comments, likes, votes, and bookmarks.

use crate::bookmarks::BookmarkStore;
use crate::error::{Result, ViewError};
use crate::format;
use agora_dialog::DialogController;
use agora_server_client::{AgoraClient, Comment, Post, VoteStatus, COMMENT_PAGE_SIZE};
use agora_session::SessionStore;
use std::sync::Arc;
use tracing::{info, warn};

/// The post detail shaped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub title: String,
    pub meta_line: String,
    pub paragraphs: Vec<String>,
    pub hero_image_url: Option<String>,
    pub like_count: String,
    pub view_count: String,
    pub reply_count: String,
    pub liked: bool,
    pub bookmarked: bool,
}

/// A comment shaped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub id: i64,
    pub author_nickname: String,
    pub time_label: String,
    pub content: String,
    pub can_edit: bool,
}

/// Controller for the post detail screen.
///
/// Loads the viewer identity and the post concurrently, pages through
/// comments, and owns the per-post user actions: comment CRUD (edit and
/// delete go through the dialog controller), like toggling, voting, and
/// the local bookmark.
pub struct PostDetailController {
    client: Arc<AgoraClient>,
    session: SessionStore,
    dialogs: Arc<DialogController>,
    bookmarks: BookmarkStore,
    post_id: i64,
    post: Option<Post>,
    viewer_id: Option<i64>,
    liked: bool,
    like_count: i64,
    reply_count: i64,
    comments: Vec<Comment>,
    comment_page: u32,
    comment_total_pages: u32,
    bookmarked: bool,
}

impl PostDetailController {
    pub fn new(
        client: Arc<AgoraClient>,
        session: SessionStore,
        dialogs: Arc<DialogController>,
        bookmarks: BookmarkStore,
        post_id: i64,
    ) -> Self {
        Self {
            client,
            session,
            dialogs,
            bookmarks,
            post_id,
            post: None,
            viewer_id: None,
            liked: false,
            like_count: 0,
            reply_count: 0,
            comments: Vec::new(),
            comment_page: 0,
            comment_total_pages: 0,
            bookmarked: false,
        }
    }

    /// Load viewer identity and post concurrently, then the first comment
    /// page. A missing viewer is fine (guests read posts); a missing post
    /// is not.
    pub async fn init(&mut self) -> Result<()> {
        let posts = self.client.posts();
        let (viewer, post) = tokio::join!(
            self.session.ensure_session(false),
            posts.get(self.post_id),
        );

        match viewer {
            Ok(user) => self.viewer_id = user.map(|u| u.id),
            Err(err) => info!(error = %err, "Could not resolve viewer identity"),
        }

        let post = post.map_err(|err| {
            warn!(error = %err, post_id = self.post_id, "Failed to load post");
            ViewError::from_api(&err, "Could not load the post.")
        })?;

        self.liked = post.liked;
        self.like_count = post.like_count;
        self.reply_count = post.reply_count;
        self.post = Some(post);
        self.bookmarked = self.bookmarks.contains(self.post_id);

        self.load_comments(0, false).await
    }

    /// Fetch one comment page; `append` keeps earlier pages.
    pub async fn load_comments(&mut self, page: u32, append: bool) -> Result<()> {
        let fetched = self
            .client
            .posts()
            .comments(self.post_id, page, COMMENT_PAGE_SIZE)
            .await
            .map_err(|err| {
                warn!(error = %err, post_id = self.post_id, "Failed to load comments");
                ViewError::from_api(&err, "Could not load comments.")
            })?;

        if append {
            self.comments.extend(fetched.items);
        } else {
            self.comments = fetched.items;
        }
        self.comment_page = fetched.page;
        self.comment_total_pages = fetched.total_pages;
        Ok(())
    }

    /// Fetch the next comment page after the current one.
    pub async fn load_more_comments(&mut self) -> Result<()> {
        self.load_comments(self.comment_page + 1, true).await
    }

    /// Whether more comment pages remain.
    pub fn has_more_comments(&self) -> bool {
        self.comment_page + 1 < self.comment_total_pages
    }

    /// Post a comment. Blank input is a quiet no-op; returns whether a
    /// comment was actually created.
    pub async fn submit_comment(&mut self, content: &str) -> Result<bool> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(false);
        }

        self.client
            .posts()
            .create_comment(self.post_id, content)
            .await
            .map_err(|err| {
                warn!(error = %err, "Failed to create comment");
                ViewError::from_api(&err, "Could not post your comment.")
            })?;

        self.reply_count += 1;
        self.load_comments(0, false).await?;
        Ok(true)
    }

    /// Edit a comment through a prompt dialog prefilled with the current
    /// content. Returns whether an update was sent.
    pub async fn edit_comment(&mut self, comment_id: i64) -> Result<bool> {
        let current = self
            .comments
            .iter()
            .find(|comment| comment.id == comment_id)
            .map(|comment| comment.content.clone())
            .unwrap_or_default();

        let Some(entered) = self.dialogs.prompt("Edit your comment.", &current).await else {
            return Ok(false);
        };
        let entered = entered.trim().to_string();
        if entered.is_empty() {
            self.dialogs.alert("Comment cannot be empty.").await;
            return Ok(false);
        }

        let updated = self
            .client
            .posts()
            .update_comment(comment_id, &entered)
            .await
            .map_err(|err| {
                warn!(error = %err, comment_id, "Failed to update comment");
                ViewError::from_api(&err, "Could not update the comment.")
            })?;

        if let Some(slot) = self
            .comments
            .iter_mut()
            .find(|comment| comment.id == comment_id)
        {
            slot.content = if updated.content.is_empty() {
                entered
            } else {
                updated.content
            };
            if updated.updated_at.is_some() {
                slot.updated_at = updated.updated_at;
            }
        }
        Ok(true)
    }

    /// Delete a comment behind a confirm dialog. Returns whether the
    /// deletion happened.
    pub async fn delete_comment(&mut self, comment_id: i64) -> Result<bool> {
        if !self.dialogs.confirm("Delete this comment?").await {
            return Ok(false);
        }

        self.client
            .posts()
            .delete_comment(comment_id)
            .await
            .map_err(|err| {
                warn!(error = %err, comment_id, "Failed to delete comment");
                ViewError::from_api(&err, "Could not delete the comment.")
            })?;

        self.comments.retain(|comment| comment.id != comment_id);
        self.reply_count = (self.reply_count - 1).max(0);
        Ok(true)
    }

    /// Flip the like state; the server response is authoritative for both
    /// the flag and the count.
    pub async fn toggle_like(&mut self) -> Result<()> {
        let result = if self.liked {
            self.client.posts().unlike(self.post_id).await
        } else {
            self.client.posts().like(self.post_id).await
        };

        let status = result.map_err(|err| {
            warn!(error = %err, post_id = self.post_id, "Failed to toggle like");
            let message = if self.liked {
                "Could not remove your like."
            } else {
                "Could not like the post."
            };
            ViewError::from_api(&err, message)
        })?;

        self.liked = status.liked;
        self.like_count = status.like_count;
        Ok(())
    }

    /// Cast a vote on the post.
    pub async fn cast_vote(&mut self, option: &str) -> Result<VoteStatus> {
        self.client
            .posts()
            .vote(self.post_id, option)
            .await
            .map_err(|err| {
                warn!(error = %err, post_id = self.post_id, "Failed to cast vote");
                ViewError::from_api(&err, "Could not register your vote.")
            })
    }

    /// Flip the local bookmark. Returns the new state.
    pub fn toggle_bookmark(&mut self) -> Result<bool> {
        let state = self.bookmarks.toggle(self.post_id).map_err(|err| {
            warn!(error = %err, post_id = self.post_id, "Failed to persist bookmark");
            ViewError::validation("Could not save the bookmark.")
        })?;
        self.bookmarked = state;
        Ok(state)
    }

    /// Whether the viewer may edit/delete a comment (they authored it).
    pub fn can_edit_comment(&self, comment: &Comment) -> bool {
        matches!(
            (self.viewer_id, comment.author_id),
            (Some(viewer), Some(author)) if viewer == author
        )
    }

    /// Whether the viewer authored the post itself.
    pub fn can_edit_post(&self) -> bool {
        matches!(
            (
                self.viewer_id,
                self.post.as_ref().and_then(|post| post.author.as_ref()).and_then(|a| a.id),
            ),
            (Some(viewer), Some(author)) if viewer == author
        )
    }

    /// The loaded post shaped for display; `None` before a successful
    /// [`init`](Self::init).
    pub fn view(&self) -> Option<PostView> {
        let post = self.post.as_ref()?;

        let author = post
            .author
            .as_ref()
            .map(|a| a.nickname.as_str())
            .filter(|nickname| !nickname.is_empty())
            .unwrap_or("Anonymous");
        let created = format::format_date(post.created_at.as_deref());
        let updated_suffix = match (&post.updated_at, &post.created_at) {
            (Some(updated), created_at) if created_at.as_deref() != Some(updated.as_str()) => {
                format!(" · updated {}", format::relative_time(Some(updated)))
            }
            _ => String::new(),
        };

        let mut paragraphs: Vec<String> = post
            .content
            .split("\n\n")
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .map(str::to_string)
            .collect();
        if paragraphs.is_empty() {
            paragraphs.push("This post has no content.".to_string());
        }

        Some(PostView {
            title: if post.title.is_empty() {
                "(untitled)".to_string()
            } else {
                post.title.clone()
            },
            meta_line: format!("by {author} • {created}{updated_suffix}"),
            paragraphs,
            hero_image_url: post.file_urls.first().cloned(),
            like_count: format::format_count(self.like_count),
            view_count: format::format_count(post.view_count),
            reply_count: format::format_count(self.reply_count),
            liked: self.liked,
            bookmarked: self.bookmarked,
        })
    }

    /// The loaded comments shaped for display.
    pub fn comment_views(&self) -> Vec<CommentView> {
        self.comments
            .iter()
            .map(|comment| CommentView {
                id: comment.id,
                author_nickname: if comment.author_nickname.is_empty() {
                    "Anonymous".to_string()
                } else {
                    comment.author_nickname.clone()
                },
                time_label: format::relative_time(
                    comment
                        .updated_at
                        .as_deref()
                        .or(comment.created_at.as_deref()),
                ),
                content: comment.content.clone(),
                can_edit: self.can_edit_comment(comment),
            })
            .collect()
    }
}
