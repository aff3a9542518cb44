//! The post feed: cursor pagination, sorting, and local keyword search.

use crate::error::{Result, ViewError};
use crate::format;
use agora_server_client::{AgoraClient, PostListQuery, PostSort, PostSummary, POST_PAGE_SIZE};
use std::sync::Arc;
use tracing::warn;

/// A feed entry shaped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: i64,
    pub title: String,
    pub author_nickname: String,
    pub created_label: String,
    pub excerpt: String,
    pub like_count: String,
    pub view_count: String,
    pub reply_count: String,
}

/// Controller for the posts list screen.
///
/// Accumulates cursor-paginated pages from the API and applies the search
/// keyword locally over what has been fetched; sorting is the server's
/// job and changing it restarts the feed.
pub struct FeedController {
    client: Arc<AgoraClient>,
    items: Vec<PostSummary>,
    cursor: Option<i64>,
    has_next: bool,
    loading: bool,
    error: Option<ViewError>,
    sort: PostSort,
    keyword: String,
    page_size: u32,
}

impl FeedController {
    pub fn new(client: Arc<AgoraClient>) -> Self {
        Self {
            client,
            items: Vec::new(),
            cursor: None,
            has_next: true,
            loading: false,
            error: None,
            sort: PostSort::default(),
            keyword: String::new(),
            page_size: POST_PAGE_SIZE,
        }
    }

    /// Restart the feed from the first page.
    pub async fn reload(&mut self) -> Result<()> {
        self.load(true).await
    }

    /// Fetch the next page, if there is one.
    pub async fn load_more(&mut self) -> Result<()> {
        self.load(false).await
    }

    /// Switch the ordering and restart the feed.
    pub async fn change_sort(&mut self, sort: PostSort) -> Result<()> {
        self.sort = sort;
        self.load(true).await
    }

    /// Current ordering.
    pub fn sort(&self) -> PostSort {
        self.sort
    }

    /// Set the local search keyword (matched against title, author, and
    /// content of already-fetched posts).
    pub fn set_keyword(&mut self, keyword: &str) {
        self.keyword = keyword.trim().to_lowercase();
    }

    /// Posts matching the current keyword.
    pub fn visible_posts(&self) -> Vec<&PostSummary> {
        self.items
            .iter()
            .filter(|post| matches_keyword(post, &self.keyword))
            .collect()
    }

    /// Visible posts shaped for display.
    pub fn cards(&self) -> Vec<PostCard> {
        self.visible_posts()
            .into_iter()
            .map(|post| PostCard {
                id: post.id,
                title: if post.title.is_empty() {
                    "(untitled)".to_string()
                } else {
                    post.title.clone()
                },
                author_nickname: if post.author_nickname.is_empty() {
                    "Anonymous".to_string()
                } else {
                    post.author_nickname.clone()
                },
                created_label: format::relative_time(post.created_at.as_deref()),
                excerpt: format::excerpt(&post.content),
                like_count: format::format_count(post.like_count),
                view_count: format::format_count(post.view_count),
                reply_count: format::format_count(post.reply_count),
            })
            .collect()
    }

    /// Message for an empty list, depending on whether a search is active.
    pub fn empty_state_message(&self) -> &'static str {
        if self.keyword.is_empty() {
            "No posts yet."
        } else {
            "No posts match your search."
        }
    }

    /// Whether a fetch is in progress.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the last page has been reached.
    pub fn end_of_feed(&self) -> bool {
        !self.has_next
    }

    /// The most recent load failure, if the feed is in an error state.
    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    async fn load(&mut self, initial: bool) -> Result<()> {
        if self.loading {
            return Ok(());
        }
        if !self.has_next && !initial {
            return Ok(());
        }

        self.loading = true;
        self.error = None;
        if initial {
            self.cursor = None;
            self.has_next = true;
        }

        let query = PostListQuery {
            cursor_id: if initial { None } else { self.cursor },
            size: self.page_size,
            sort: self.sort,
        };
        let result = self.client.posts().list(&query).await;
        self.loading = false;

        match result {
            Ok(page) => {
                if initial {
                    self.items = page.items;
                } else {
                    self.items.extend(page.items);
                }
                self.cursor = page.next_cursor;
                self.has_next = page.has_next;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Failed to load the post feed");
                let view_err = ViewError::from_api(&err, "Could not load posts.");
                self.error = Some(view_err.clone());
                Err(view_err)
            }
        }
    }
}

fn matches_keyword(post: &PostSummary, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    post.title.to_lowercase().contains(keyword)
        || post.author_nickname.to_lowercase().contains(keyword)
        || post.content.to_lowercase().contains(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, author: &str, content: &str) -> PostSummary {
        PostSummary {
            id: 1,
            title: title.to_string(),
            content: content.to_string(),
            author_nickname: author.to_string(),
            created_at: None,
            like_count: 0,
            view_count: 0,
            reply_count: 0,
        }
    }

    #[test]
    fn keyword_matches_title_author_and_content() {
        let entry = post("Rust tips", "Ann", "Borrow checker notes");

        assert!(matches_keyword(&entry, ""));
        assert!(matches_keyword(&entry, "rust"));
        assert!(matches_keyword(&entry, "ann"));
        assert!(matches_keyword(&entry, "borrow"));
        assert!(!matches_keyword(&entry, "python"));
    }

    #[test]
    fn cards_fall_back_for_missing_fields() {
        let client = Arc::new(
            AgoraClient::new(agora_server_client::ClientConfig::new(
                "http://127.0.0.1:1/api",
            ))
            .expect("valid url"),
        );
        let mut feed = FeedController::new(client);
        feed.items = vec![post("", "", "")];

        let cards = feed.cards();
        assert_eq!(cards[0].title, "(untitled)");
        assert_eq!(cards[0].author_nickname, "Anonymous");
        assert_eq!(cards[0].excerpt, "No preview available.");
    }
}
