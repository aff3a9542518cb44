//! The session store: page-lifetime cache of the authenticated user.

use crate::error::{Result, SessionError};
use crate::events::SessionEvent;
use agora_core::SessionUser;
use agora_server_client::{AgoraClient, ApiError};
use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

/// Outcome of a session refresh, shared by every caller that joined it.
pub type RefreshOutcome = Result<Option<SessionUser>>;

type RefreshFuture = Shared<BoxFuture<'static, RefreshOutcome>>;

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Single source of truth for "who is the current user".
///
/// Holds at most one sanitized [`SessionUser`] (or none) for the lifetime
/// of the process and answers synchronously once known. Refreshes against
/// the API are deduplicated: no matter how many callers ask concurrently,
/// at most one `GET /users/me` is outstanding at any time.
///
/// Refresh policy:
/// - 401 is authoritative — the session is cleared and `None` is returned.
/// - A timeout degrades to the previous cached state rather than failing.
/// - Any other failure surfaces as an error and leaves the cache alone;
///   stale-but-present beats flapping to signed-out on transient errors.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    client: Arc<AgoraClient>,
    current: RwLock<Option<SessionUser>>,
    events: broadcast::Sender<SessionEvent>,
    in_flight: Mutex<Option<RefreshFuture>>,
}

impl SessionStore {
    /// Create a store over a shared API client.
    ///
    /// The client is shared so that a login performed elsewhere (which
    /// stores the session cookie on the client) is visible to refreshes.
    pub fn new(client: Arc<AgoraClient>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                client,
                current: RwLock::new(None),
                events,
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Snapshot of the cached user, without any network round-trip.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.inner.snapshot()
    }

    /// Whether a user is currently cached.
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Subscribe to session change events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Sanitize and store a raw profile payload.
    ///
    /// A payload that fails sanitization clears the session instead of
    /// storing a partial record.
    pub fn save_session(&self, raw: &Value) {
        self.inner.save(raw);
    }

    /// Drop the cached user and notify listeners.
    pub fn clear_session(&self) {
        self.inner.clear();
    }

    /// Return the cached user, refreshing from the API when the cache is
    /// empty or `force_refresh` is set.
    ///
    /// Concurrent callers share a single in-flight request; the pending
    /// slot is cleared once it settles so the next call starts fresh.
    pub async fn ensure_session(&self, force_refresh: bool) -> RefreshOutcome {
        if !force_refresh {
            if let Some(user) = self.current_user() {
                return Ok(Some(user));
            }
        }

        let refresh = {
            let mut slot = self.inner.in_flight.lock().await;
            if let Some(pending) = slot.as_ref() {
                debug!("Joining in-flight session refresh");
                pending.clone()
            } else {
                let inner = Arc::clone(&self.inner);
                let pending: RefreshFuture = async move {
                    let outcome = inner.refresh().await;
                    // Settled: clear the slot so the next call starts fresh.
                    inner.in_flight.lock().await.take();
                    outcome
                }
                .boxed()
                .shared();
                *slot = Some(pending.clone());
                pending
            }
        };

        refresh.await
    }

    /// Force a refresh from the API.
    pub async fn refresh_session(&self) -> RefreshOutcome {
        self.ensure_session(true).await
    }

    /// End the session on the server and locally.
    ///
    /// The local cache is always cleared, whatever the server said: a 2xx
    /// or a 401 both mean "logged out", and any other failure is surfaced
    /// only after the local state is already gone.
    pub async fn logout(&self) -> Result<()> {
        let result = self.inner.client.auth().logout().await;
        self.clear_session();

        match result {
            Ok(()) | Err(ApiError::AuthRequired) => Ok(()),
            Err(err) => {
                warn!(error = %err, "Logout request failed, session cleared locally");
                Err(SessionError::from(err))
            }
        }
    }
}

impl Inner {
    fn snapshot(&self) -> Option<SessionUser> {
        self.current
            .read()
            .expect("session cache lock poisoned")
            .clone()
    }

    fn save(&self, raw: &Value) {
        match SessionUser::sanitize(raw) {
            Some(user) => {
                *self.current.write().expect("session cache lock poisoned") = Some(user.clone());
                debug!(user_id = user.id, "Session updated");
                self.emit(SessionEvent::Updated(user));
            }
            None => {
                warn!("Rejected malformed session payload");
                self.clear();
            }
        }
    }

    fn clear(&self) {
        *self.current.write().expect("session cache lock poisoned") = None;
        debug!("Session cleared");
        self.emit(SessionEvent::Cleared);
    }

    /// Notify listeners. A failed delivery must never break the operation
    /// that triggered it, so the error is logged and swallowed.
    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("No session event listeners");
        }
    }

    async fn refresh(&self) -> RefreshOutcome {
        match self.client.auth().fetch_profile().await {
            Ok(raw) => {
                self.save(&raw);
                Ok(self.snapshot())
            }
            Err(ApiError::AuthRequired) => {
                debug!("Session refresh got 401, signing out");
                self.clear();
                Ok(None)
            }
            Err(ApiError::Timeout) => {
                warn!("Session refresh timed out, keeping previous state");
                Ok(self.snapshot())
            }
            Err(err) => {
                warn!(error = %err, "Session refresh failed");
                Err(SessionError::from(err))
            }
        }
    }
}
