//! Agora Core
//!
//! Shared types for the Agora community client stack.
//!
//! This crate provides the building blocks used by the API client, the
//! session cache, the view controllers, and the gateway binary:
//! - **Domain Types**: `SessionUser` and the sanitize boundary that
//!   produces it from raw API payloads
//! - **Client Defaults**: the environment-resolved configuration values
//!   shared between the gateway and the client
//!
//! # Example
//!
//! ```rust
//! use agora_core::types::SessionUser;
//! use serde_json::json;
//!
//! // A raw profile from the API is sanitized at the boundary
//! let raw = json!({ "id": 7, "nickname": "Ann" });
//! let user = SessionUser::sanitize(&raw).expect("numeric id present");
//! assert_eq!(user.nickname, "Ann");
//!
//! // Payloads without a numeric id are rejected, not patched up
//! assert!(SessionUser::sanitize(&json!({ "nickname": "ghost" })).is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod defaults;
pub mod types;

// Re-export commonly used types
pub use defaults::ClientDefaults;
pub use types::SessionUser;
