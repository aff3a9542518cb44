//! Agora Session
//!
//! Client-side session cache: the single source of truth for "is logged
//! in". The store keeps at most one sanitized user for the lifetime of the
//! process, deduplicates concurrent refreshes into a single in-flight
//! request, and broadcasts change events so UI components never poll.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use agora_server_client::{AgoraClient, ClientConfig};
//! use agora_session::SessionStore;
//!
//! let client = Arc::new(AgoraClient::new(ClientConfig::new("https://example.com/api"))?);
//! let session = SessionStore::new(client);
//!
//! // Many concurrent callers, one network request.
//! let user = session.ensure_session(false).await?;
//! println!("signed in: {}", user.is_some());
//! ```

mod error;
mod events;
mod store;

pub use error::{Result, SessionError};
pub use events::SessionEvent;
pub use store::{RefreshOutcome, SessionStore};
