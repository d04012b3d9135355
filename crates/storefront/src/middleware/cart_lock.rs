//! Per-visitor serialization of cart mutations.
//!
//! A cart change reads the session, mutates it, and the session layer
//! writes the record back after the handler returns. Two overlapping
//! requests from one visitor would both start from the same snapshot, so
//! state-changing requests carrying the same session cookie are run one at
//! a time. The lock wraps the session layer so that its final save happens
//! inside the critical section.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::Response,
};
use moka::sync::Cache;
use tokio::sync::Mutex;
use tower_sessions::cookie::Cookie;

use super::session::SESSION_COOKIE_NAME;
use crate::state::AppState;

/// Upper bound on tracked sessions.
const MAX_TRACKED_SESSIONS: u64 = 10_000;

/// Locks are dropped after this long without a request.
const LOCK_IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// One async mutex per session cookie value.
#[derive(Clone)]
pub struct CartLocks {
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl CartLocks {
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: Cache::builder()
                .max_capacity(MAX_TRACKED_SESSIONS)
                .time_to_idle(LOCK_IDLE_TIMEOUT)
                .build(),
        }
    }

    /// The mutex shared by every request carrying `session`.
    #[must_use]
    pub fn lock_for(&self, session: &str) -> Arc<Mutex<()>> {
        self.locks
            .get_with(session.to_string(), || Arc::new(Mutex::new(())))
    }
}

impl Default for CartLocks {
    fn default() -> Self {
        Self::new()
    }
}

/// The session id cookie sent with the request, if any.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME && !cookie.value().is_empty())
        .map(|cookie| cookie.value().to_string())
}

/// Run state-changing requests of one session one at a time.
///
/// Requests without a session cookie start a fresh session and cannot race
/// with anything, so they pass straight through, as do safe methods.
pub async fn cart_lock_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if request.method().is_safe() {
        return next.run(request).await;
    }
    let Some(session) = session_cookie(request.headers()) else {
        return next.run(request).await;
    };

    let lock = state.cart_locks().lock_for(&session);
    let _guard = lock.lock().await;
    next.run(request).await
}
