//! Local bookmark persistence.
//!
//! Bookmarks are a purely local feature: post ids in a small JSON file,
//! the native analog of the browser's localStorage entry.

use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// File-backed set of bookmarked post ids.
#[derive(Debug, Clone)]
pub struct BookmarkStore {
    path: PathBuf,
}

impl BookmarkStore {
    /// Create a store over a JSON file path. The file is created lazily on
    /// the first toggle.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All bookmarked post ids. A missing or corrupt file degrades to an
    /// empty list, never an error.
    pub fn load(&self) -> Vec<i64> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                debug!(error = %err, path = %self.path.display(), "Ignoring corrupt bookmark file");
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    /// Whether a post is bookmarked.
    pub fn contains(&self, post_id: i64) -> bool {
        self.load().contains(&post_id)
    }

    /// Flip a post's bookmark and persist. Returns the new state.
    pub fn toggle(&self, post_id: i64) -> io::Result<bool> {
        let mut ids = self.load();
        let bookmarked = match ids.iter().position(|&id| id == post_id) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(post_id);
                true
            }
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string(&ids)?)?;
        Ok(bookmarked)
    }
}
