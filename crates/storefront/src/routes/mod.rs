//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero, catalog controls + grid, FAQ)
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /catalog                - Catalog grid fragment for the current filters (HTMX)
//! GET  /items/{id}             - Item detail (modal fragment under HTMX, page otherwise)
//! GET  /modal/close            - Empty fragment that closes the item modal (HTMX)
//!
//! # Cart (HTMX fragments, 303 redirects to /cart without HTMX)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Set quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! POST /cart/clear             - Empty the cart (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Hand off to the external payment page
//! ```

pub mod cart;
pub mod catalog;
pub mod home;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request},
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware;
use crate::state::AppState;

/// Header set by HTMX on every request it issues.
const HX_REQUEST_HEADER: &str = "hx-request";

/// Whether the request was issued by HTMX (and wants a fragment back).
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(catalog::grid))
        .route("/items/{id}", get(catalog::show))
        .route("/modal/close", get(catalog::close_modal))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        .route("/health", get(health))
        // Catalog routes
        .merge(catalog_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout hand-off
        .route("/checkout", get(cart::checkout))
}

/// Build the complete application: routes, static files, and the middleware
/// stack (everything except the Sentry layers, which `main` adds on top).
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .merge(routes())
        .nest_service("/static", static_dir)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(session_layer)
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
