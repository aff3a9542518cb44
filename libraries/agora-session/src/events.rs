//! Session Events
//!
//! Event-based communication for UI synchronization when the session
//! changes. Components subscribe instead of polling the store.

use agora_core::SessionUser;

/// Events emitted by the session store
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A sanitized user was stored (login or refresh)
    Updated(SessionUser),
    /// The session was cleared (logout, 401, or rejected payload)
    Cleared,
}
