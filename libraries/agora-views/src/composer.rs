//! Post composer: create, edit, and delete posts.

use crate::error::{Result, ViewError};
use agora_dialog::DialogController;
use agora_server_client::{AgoraClient, NewPost, PostUpdate};
use std::sync::Arc;
use tracing::warn;

/// A file picked for upload alongside a post or profile.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub contents: Vec<u8>,
    pub content_type: String,
}

/// Editable post fields plus an optional attachment.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub attachment: Option<Attachment>,
}

/// Controller for the post create/edit screens.
///
/// An attachment, when present, is uploaded first and the returned file id
/// rides along with the post payload.
pub struct ComposerController {
    client: Arc<AgoraClient>,
    dialogs: Arc<DialogController>,
}

impl ComposerController {
    pub fn new(client: Arc<AgoraClient>, dialogs: Arc<DialogController>) -> Self {
        Self { client, dialogs }
    }

    /// Create a post. Returns the new post's id.
    pub async fn create(&self, draft: PostDraft) -> Result<i64> {
        let title = draft.title.trim().to_string();
        let content = draft.content.trim().to_string();
        if title.is_empty() || content.is_empty() {
            return Err(ViewError::validation("Please enter a title and content."));
        }

        let mut file_ids = Vec::new();
        if let Some(attachment) = draft.attachment {
            file_ids.push(self.upload(attachment).await?);
        }

        let created = self
            .client
            .posts()
            .create(&NewPost {
                title,
                content,
                file_ids,
            })
            .await
            .map_err(|err| {
                warn!(error = %err, "Failed to create post");
                ViewError::from_api(&err, "Could not publish the post.")
            })?;

        Ok(created.id)
    }

    /// Load an existing post's editable fields as a draft.
    pub async fn load_for_edit(&self, post_id: i64) -> Result<PostDraft> {
        let post = self.client.posts().get(post_id).await.map_err(|err| {
            warn!(error = %err, post_id, "Failed to load post for editing");
            ViewError::from_api(&err, "Could not load the post.")
        })?;

        Ok(PostDraft {
            title: post.title,
            content: post.content,
            attachment: None,
        })
    }

    /// Update a post. The file list is only replaced when a new attachment
    /// was picked.
    pub async fn update(&self, post_id: i64, draft: PostDraft) -> Result<()> {
        let title = draft.title.trim().to_string();
        let content = draft.content.trim().to_string();
        if title.is_empty() || content.is_empty() {
            return Err(ViewError::validation("Please enter a title and content."));
        }

        let file_ids = match draft.attachment {
            Some(attachment) => Some(vec![self.upload(attachment).await?]),
            None => None,
        };

        self.client
            .posts()
            .update(
                post_id,
                &PostUpdate {
                    title,
                    content,
                    file_ids,
                },
            )
            .await
            .map_err(|err| {
                warn!(error = %err, post_id, "Failed to update post");
                ViewError::from_api(&err, "Could not save your changes.")
            })
    }

    /// Delete a post behind a confirm dialog. Returns whether the deletion
    /// happened.
    pub async fn delete(&self, post_id: i64) -> Result<bool> {
        if !self.dialogs.confirm("Delete this post?").await {
            return Ok(false);
        }

        self.client.posts().delete(post_id).await.map_err(|err| {
            warn!(error = %err, post_id, "Failed to delete post");
            ViewError::from_api(&err, "Could not delete the post.")
        })?;
        Ok(true)
    }

    async fn upload(&self, attachment: Attachment) -> Result<i64> {
        let uploaded = self
            .client
            .files()
            .upload(
                &attachment.file_name,
                attachment.contents,
                &attachment.content_type,
            )
            .await
            .map_err(|err| {
                warn!(error = %err, file = %attachment.file_name, "Failed to upload file");
                ViewError::from_api(&err, "Could not upload the file.")
            })?;
        Ok(uploaded.id)
    }
}
