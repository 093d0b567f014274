//! Catalog route handlers.
//!
//! The grid is re-rendered on the server for every change of the search box,
//! type chips, sort select, or digital-only toggle; HTMX swaps the fragment in.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use educart_core::{Catalog, CatalogFilter, CatalogItem, ItemId, ItemType, SortKey, TypeFilter};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::{cart, is_htmx};
use crate::site::SiteInfo;
use crate::state::AppState;

/// Catalog item display data for templates.
#[derive(Clone)]
pub struct ItemView {
    pub id: String,
    pub type_label: &'static str,
    pub title: String,
    pub description: String,
    pub price: String,
    pub tags: Vec<String>,
    /// Empty when the item has no thumbnail.
    pub thumb: String,
    /// Empty when the item has no downloadable sample.
    pub sample_url: String,
    pub format_label: String,
    /// e.g. `12 ชั่วโมง • 45 บทเรียน`; empty for non-courses.
    pub course_info: String,
    pub is_bestseller: bool,
    pub is_new: bool,
}

impl ItemView {
    /// Build the view of `item`, formatting its price in the catalog currency.
    #[must_use]
    pub fn new(item: &CatalogItem, catalog: &Catalog) -> Self {
        Self {
            id: item.id.to_string(),
            type_label: item.item_type.label(),
            title: item.title.clone(),
            description: item.description.clone(),
            price: catalog.price_of(item).display(),
            tags: item.tags.clone(),
            thumb: item.thumb.clone().unwrap_or_default(),
            sample_url: item.sample_url.clone().unwrap_or_default(),
            format_label: item.format_label(),
            course_info: course_info(item),
            is_bestseller: item.is_bestseller,
            is_new: item.is_new,
        }
    }
}

fn course_info(item: &CatalogItem) -> String {
    if item.item_type != ItemType::Course {
        return String::new();
    }
    let mut parts = Vec::with_capacity(2);
    if let Some(hours) = item.hours {
        parts.push(format!("{hours} ชั่วโมง"));
    }
    if let Some(lessons) = item.lessons {
        parts.push(format!("{lessons} บทเรียน"));
    }
    parts.join(" • ")
}

/// Catalog control query parameters.
///
/// Every parameter is optional and parsed leniently: unknown values fall back
/// to the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub sort: Option<String>,
    pub digital: Option<String>,
}

impl CatalogQuery {
    /// Resolve the query into filter inputs and a sort key.
    #[must_use]
    pub fn resolve(&self) -> (CatalogFilter, SortKey) {
        let item_type = self
            .item_type
            .as_deref()
            .and_then(|value| value.parse::<TypeFilter>().ok())
            .unwrap_or_default();
        let sort = self
            .sort
            .as_deref()
            .and_then(|value| value.parse::<SortKey>().ok())
            .unwrap_or_default();
        let only_digital = self
            .digital
            .as_deref()
            .map(str::trim)
            .is_some_and(|value| !matches!(value, "" | "0" | "false"));

        let filter = CatalogFilter {
            query: self.q.clone().unwrap_or_default(),
            item_type,
            only_digital,
        };
        (filter, sort)
    }
}

/// A selectable option (type chip or sort choice).
#[derive(Clone)]
pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Current state of the catalog controls, for re-rendering them.
#[derive(Clone)]
pub struct ControlsView {
    pub query: String,
    pub type_options: Vec<OptionView>,
    pub sort_options: Vec<OptionView>,
    pub only_digital: bool,
}

impl ControlsView {
    #[must_use]
    pub fn new(filter: &CatalogFilter, sort: SortKey) -> Self {
        Self {
            query: filter.query.clone(),
            type_options: TypeFilter::ALL
                .iter()
                .map(|&option| OptionView {
                    value: option.as_str(),
                    label: option.label(),
                    selected: option == filter.item_type,
                })
                .collect(),
            sort_options: SortKey::ALL
                .iter()
                .map(|&option| OptionView {
                    value: option.as_str(),
                    label: option.label(),
                    selected: option == sort,
                })
                .collect(),
            only_digital: filter.only_digital,
        }
    }
}

/// Render the filtered, sorted catalog as item views.
#[must_use]
pub fn item_views(catalog: &Catalog, filter: &CatalogFilter, sort: SortKey) -> Vec<ItemView> {
    catalog
        .derive_view(filter, sort)
        .into_iter()
        .map(|item| ItemView::new(item, catalog))
        .collect()
}

/// Catalog grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/catalog_grid.html")]
pub struct CatalogGridTemplate {
    pub items: Vec<ItemView>,
}

/// Item detail modal fragment template (for HTMX).
///
/// Wraps the detail view in a backdrop and close button; both empty `#modal`.
#[derive(Template, WebTemplate)]
#[template(path = "partials/item_modal.html")]
pub struct ItemModalTemplate {
    pub item: ItemView,
}

/// Item detail page template (direct navigation).
#[derive(Template, WebTemplate)]
#[template(path = "items/show.html")]
pub struct ItemPageTemplate {
    pub site: SiteInfo,
    pub cart_count: u64,
    pub item: ItemView,
}

/// Catalog grid for the current controls.
#[instrument(skip(state))]
pub async fn grid(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let (filter, sort) = query.resolve();
    let items = item_views(state.catalog(), &filter, sort);
    tracing::debug!(results = items.len(), sort = %sort, "Catalog view derived");

    CatalogGridTemplate { items }
}

/// Item detail: modal fragment under HTMX, full page otherwise.
#[instrument(skip(state, session, headers))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response> {
    let catalog = state.catalog();
    let item = catalog
        .get(&ItemId::new(id.as_str()))
        .ok_or_else(|| AppError::NotFound(format!("item {id}")))?;
    let item = ItemView::new(item, catalog);

    if is_htmx(&headers) {
        return Ok(ItemModalTemplate { item }.into_response());
    }

    Ok(ItemPageTemplate {
        site: state.site().clone(),
        cart_count: cart::load(&session).await.item_count(),
        item,
    }
    .into_response())
}

/// Close the item modal by swapping in nothing.
pub async fn close_modal() -> Html<&'static str> {
    Html("")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(
        q: Option<&str>,
        ty: Option<&str>,
        sort: Option<&str>,
        digital: Option<&str>,
    ) -> CatalogQuery {
        CatalogQuery {
            q: q.map(String::from),
            item_type: ty.map(String::from),
            sort: sort.map(String::from),
            digital: digital.map(String::from),
        }
    }

    #[test]
    fn test_empty_query_uses_defaults() {
        let (filter, sort) = CatalogQuery::default().resolve();
        assert_eq!(filter, CatalogFilter::default());
        assert_eq!(sort, SortKey::Popular);
    }

    #[test]
    fn test_query_parses_known_values() {
        let (filter, sort) =
            query(Some("ป.3"), Some("course"), Some("price_desc"), Some("1")).resolve();
        assert_eq!(filter.query, "ป.3");
        assert_eq!(filter.item_type, TypeFilter::Course);
        assert!(filter.only_digital);
        assert_eq!(sort, SortKey::PriceDesc);
    }

    #[test]
    fn test_query_ignores_unknown_values() {
        let (filter, sort) = query(None, Some("video"), Some("cheapest"), Some("0")).resolve();
        assert_eq!(filter.item_type, TypeFilter::All);
        assert!(!filter.only_digital);
        assert_eq!(sort, SortKey::Popular);

        let (filter, _) = query(None, None, None, Some("on")).resolve();
        assert!(filter.only_digital);
        let (filter, _) = query(None, None, None, Some("")).resolve();
        assert!(!filter.only_digital);
    }

    #[test]
    fn test_item_view_course_info() {
        let catalog = Catalog::sample();
        let course = ItemView::new(catalog.get(&ItemId::new("crs-101")).unwrap(), &catalog);
        assert_eq!(course.course_info, "12 ชั่วโมง • 45 บทเรียน");
        assert_eq!(course.price, "฿1,290.00");

        let worksheet = ItemView::new(catalog.get(&ItemId::new("wks-001")).unwrap(), &catalog);
        assert!(worksheet.course_info.is_empty());
        assert!(worksheet.is_bestseller);
    }

    #[test]
    fn test_controls_mark_selection() {
        let filter = CatalogFilter {
            item_type: TypeFilter::Comic,
            ..CatalogFilter::default()
        };
        let controls = ControlsView::new(&filter, SortKey::New);
        let selected_types: Vec<_> = controls
            .type_options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected_types, vec!["comic"]);
        let selected_sorts: Vec<_> = controls
            .sort_options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected_sorts, vec!["new"]);
    }
}
