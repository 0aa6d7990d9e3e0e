//! Per-visitor request serialization.
//!
//! The session layer writes the whole record back after the handler returns,
//! so two overlapping requests from one visitor would each store the snapshot
//! they loaded and the later write would drop the earlier change. Requests
//! that carry the same session cookie therefore queue on one lock, held
//! across the session layer including its save. Waiters are admitted in
//! arrival order.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use moka::future::Cache;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tower_sessions::cookie::Cookie;

use super::session::SESSION_COOKIE_NAME;

/// Visitors tracked at once before idle locks are evicted early.
const MAX_VISITORS: u64 = 100_000;

/// Locks idle this long are dropped; sessions end with the browser anyway.
const LOCK_IDLE: Duration = Duration::from_secs(30 * 60);

/// One async lock per session cookie value.
#[derive(Clone)]
pub struct VisitorLocks {
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl Default for VisitorLocks {
    fn default() -> Self {
        Self::new()
    }
}

impl VisitorLocks {
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: Cache::builder()
                .max_capacity(MAX_VISITORS)
                .time_to_idle(LOCK_IDLE)
                .build(),
        }
    }

    /// Wait for exclusive access on behalf of one visitor.
    pub async fn acquire(&self, visitor: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .get_with(visitor.to_string(), async { Arc::new(Mutex::new(())) })
            .await;
        lock.lock_owned().await
    }
}

/// Middleware that runs one visitor's requests one at a time.
///
/// Must sit outside the session layer. Requests without a session cookie
/// start a fresh session and have nothing to race with; static assets never
/// touch the session.
pub async fn visitor_lock_middleware(
    State(locks): State<VisitorLocks>,
    request: Request,
    next: Next,
) -> Response {
    if request.uri().path().starts_with("/static/") {
        return next.run(request).await;
    }

    let Some(visitor) = session_cookie(&request) else {
        return next.run(request).await;
    };

    let _guard = locks.acquire(&visitor).await;
    next.run(request).await
}

/// Value of the session cookie, if the request carries one.
fn session_cookie(request: &Request) -> Option<String> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| Cookie::split_parse(header).flatten())
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}
