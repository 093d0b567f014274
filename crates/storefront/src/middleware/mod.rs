//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with an evicting in-memory store, holds the cart)
//! 5. Security headers (CSP, frame denial, etc.)

pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod session_store;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{SessionSnapshot, create_session_layer};
pub use session_store::CacheSessionStore;
