//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::routes::cart;
use crate::routes::catalog::{CatalogQuery, ControlsView, ItemView, item_views};
use crate::site::SiteInfo;
use crate::state::AppState;

/// Home page template.
///
/// Renders the hero, catalog controls and grid for the requested filters (so
/// links such as `/?type=course&sort=price_asc` work without HTMX), the
/// contact block, and the FAQ.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub site: SiteInfo,
    pub cart_count: u64,
    pub controls: ControlsView,
    pub items: Vec<ItemView>,
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let (filter, sort) = query.resolve();
    let items = item_views(state.catalog(), &filter, sort);
    let cart_count = cart::load(&session).await.item_count();

    HomeTemplate {
        site: state.site().clone(),
        cart_count,
        controls: ControlsView::new(&filter, sort),
        items,
    }
}
