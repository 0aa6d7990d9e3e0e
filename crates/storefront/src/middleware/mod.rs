//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (fill in the span field, echo the header)
//! 4. Security headers (CSP, frame and referrer policy)
//! 5. Visitor lock (one request at a time per session cookie)
//! 6. Session layer (tower-sessions with an in-memory store)

pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod visitor_lock;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use visitor_lock::{VisitorLocks, visitor_lock_middleware};
