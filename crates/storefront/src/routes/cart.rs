//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Without HTMX every mutation answers with a 303 back to `/cart`. The cart
//! itself lives in the visitor's session under the `cart` key and is loaded
//! and written back around each request.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use educart_core::{CART_STORAGE_KEY, Cart, CartManager, Catalog, ItemId, Price};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::SessionSnapshot;
use crate::routes::is_htmx;
use crate::site::SiteInfo;
use crate::state::AppState;

/// Event fired on the client after every cart mutation.
const CART_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    /// Empty when the item has no thumbnail.
    pub thumb: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// Quantity for the "-" button; never below 1.
    pub dec_quantity: u32,
    /// Quantity for the "+" button.
    pub inc_quantity: u32,
    /// The line references an item no longer in the catalog.
    pub missing: bool,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Build the view of `cart`, pricing lines against `catalog`.
    #[must_use]
    pub fn new(cart: &Cart, catalog: &Catalog) -> Self {
        let currency = catalog.currency();
        let items = cart
            .resolve(catalog)
            .into_iter()
            .map(|resolved| {
                let line = resolved.line;
                let (title, thumb, price) = resolved.item.map_or_else(
                    || (line.id.to_string(), String::new(), "-".to_string()),
                    |item| {
                        (
                            item.title.clone(),
                            item.thumb.clone().unwrap_or_default(),
                            catalog.price_of(item).display(),
                        )
                    },
                );
                CartItemView {
                    id: line.id.to_string(),
                    title,
                    thumb,
                    quantity: line.qty,
                    price,
                    line_price: Price::new(resolved.line_total(), currency).display(),
                    dec_quantity: line.qty.saturating_sub(1).max(1),
                    inc_quantity: line.qty.saturating_add(1),
                    missing: resolved.item.is_none(),
                }
            })
            .collect();

        Self {
            items,
            subtotal: cart.total_price(catalog).display(),
            item_count: cart.item_count(),
        }
    }

    /// Whether there is nothing in the cart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the visitor's cart from the session.
///
/// A missing or malformed stored cart yields an empty cart.
pub async fn load(session: &Session) -> CartManager<SessionSnapshot> {
    CartManager::load(SessionSnapshot::load(session, &[CART_STORAGE_KEY]).await)
}

/// Write the cart back to the session if it changed.
async fn save(session: &Session, manager: CartManager<SessionSnapshot>) {
    let snapshot = manager.into_store();
    if snapshot.is_dirty() {
        snapshot.flush(session).await;
    }
}

/// Add to cart form data.
///
/// `quantity` is taken as typed into the number input: blank or unparsable
/// means 1 and anything below 1 is raised to 1.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
    pub quantity: Option<String>,
}

impl AddToCartForm {
    /// The quantity to add, always at least 1.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
            .as_deref()
            .map(str::trim)
            .and_then(|value| value.parse::<i64>().ok())
            .map_or(1, |qty| u32::try_from(qty.max(1)).unwrap_or(u32::MAX))
    }
}

/// Update cart form data.
///
/// `quantity` is signed: anything below 1 is clamped to 1.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub site: SiteInfo,
    pub cart_count: u64,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub site: SiteInfo,
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Answer a cart mutation: the refreshed cart items under HTMX, otherwise a
/// redirect to the cart page.
fn cart_items_response(
    state: &AppState,
    headers: &HeaderMap,
    manager: &CartManager<SessionSnapshot>,
) -> Response {
    if !is_htmx(headers) {
        return Redirect::to("/cart").into_response();
    }

    (
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartItemsTemplate {
            site: state.site().clone(),
            cart: CartView::new(manager.cart(), state.catalog()),
        },
    )
        .into_response()
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let manager = load(&session).await;
    let cart = CartView::new(manager.cart(), state.catalog());

    CartShowTemplate {
        site: state.site().clone(),
        cart_count: cart.item_count,
        cart,
    }
}

/// Add item to cart.
///
/// Returns the cart count badge with an HTMX trigger so other elements
/// refresh. Ids that are not in the catalog are rejected.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = ItemId::new(form.id.trim());
    if state.catalog().get(&id).is_none() {
        return Err(AppError::BadRequest(format!("unknown item {id}")));
    }
    let quantity = form.quantity();

    let mut manager = load(&session).await;
    manager.add_item(id.clone(), quantity);
    let count = manager.item_count();

    let quantity_str = quantity.to_string();
    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("item_id", id.as_str()), ("quantity", quantity_str.as_str())]),
    );
    tracing::info!(item_id = %id, quantity, count, "Item added to cart");

    save(&session, manager).await;

    if !is_htmx(&headers) {
        return Ok(Redirect::to("/cart").into_response());
    }

    Ok((
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Set a cart line's quantity.
///
/// Ids not in the cart are ignored.
#[instrument(skip(state, session, headers))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let id = ItemId::new(form.id.trim());

    let mut manager = load(&session).await;
    if manager.set_quantity(&id, form.quantity) {
        let quantity_str = form.quantity.to_string();
        add_breadcrumb(
            "cart",
            "Updated quantity",
            Some(&[("item_id", id.as_str()), ("quantity", quantity_str.as_str())]),
        );
    } else {
        tracing::debug!(item_id = %id, "Quantity update for item not in cart");
    }

    let response = cart_items_response(&state, &headers, &manager);
    save(&session, manager).await;
    response
}

/// Remove an item from the cart.
#[instrument(skip(state, session, headers))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let id = ItemId::new(form.id.trim());

    let mut manager = load(&session).await;
    if manager.remove_item(&id) {
        add_breadcrumb("cart", "Removed item", Some(&[("item_id", id.as_str())]));
    }

    let response = cart_items_response(&state, &headers, &manager);
    save(&session, manager).await;
    response
}

/// Empty the cart.
#[instrument(skip(state, session, headers))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Response {
    let mut manager = load(&session).await;
    manager.clear();
    add_breadcrumb("cart", "Cleared cart", None);

    let response = cart_items_response(&state, &headers, &manager);
    save(&session, manager).await;
    response
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    CartCountTemplate {
        count: load(&session).await.item_count(),
    }
}

/// Hand the visitor off to the external payment page.
///
/// An empty cart goes back to the cart page; while checkout is still the
/// placeholder link the visitor lands on the payment instructions instead.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Response {
    let manager = load(&session).await;
    if manager.cart().is_empty() {
        return Redirect::to("/cart").into_response();
    }

    let total = manager.total_price(state.catalog()).display();
    let count = manager.item_count();
    add_breadcrumb("checkout", "Checkout started", Some(&[("total", total.as_str())]));
    tracing::info!(count, total = %total, "Checkout hand-off");

    let site = state.site();
    if site.checkout_is_placeholder() {
        return Redirect::to("/cart#payment").into_response();
    }
    Redirect::to(&site.checkout_url).into_response()
}

#[cfg(test)]
mod tests {
    use educart_core::CartLine;

    use super::*;

    #[test]
    fn test_cart_view_prices_lines() {
        let catalog = Catalog::sample();
        let cart = Cart::from_lines([CartLine::new("wks-001", 3), CartLine::new("cmc-201", 1)]);

        let view = CartView::new(&cart, &catalog);
        assert_eq!(view.item_count, 4);
        assert_eq!(view.subtotal, "฿436.00");
        assert_eq!(view.items.len(), 2);

        let first = &view.items[0];
        assert_eq!(first.id, "wks-001");
        assert_eq!(first.price, "฿79.00");
        assert_eq!(first.line_price, "฿237.00");
        assert_eq!(first.dec_quantity, 2);
        assert_eq!(first.inc_quantity, 4);
        assert!(!first.missing);
    }

    #[test]
    fn test_cart_view_keeps_missing_items() {
        let catalog = Catalog::sample();
        let cart = Cart::from_lines([CartLine::new("gone-1", 1), CartLine::new("wks-002", 1)]);

        let view = CartView::new(&cart, &catalog);
        assert_eq!(view.subtotal, "฿89.00");
        assert!(view.items[0].missing);
        assert_eq!(view.items[0].title, "gone-1");
        assert_eq!(view.items[0].line_price, "฿0.00");
        assert_eq!(view.items[0].dec_quantity, 1);
    }

    #[test]
    fn test_add_form_quantity_is_lenient() {
        let form = |quantity: Option<&str>| AddToCartForm {
            id: "wks-001".to_string(),
            quantity: quantity.map(String::from),
        };
        assert_eq!(form(None).quantity(), 1);
        assert_eq!(form(Some("")).quantity(), 1);
        assert_eq!(form(Some(" 3 ")).quantity(), 3);
        assert_eq!(form(Some("-2")).quantity(), 1);
        assert_eq!(form(Some("0")).quantity(), 1);
        assert_eq!(form(Some("lots")).quantity(), 1);
        assert_eq!(form(Some("99999999999")).quantity(), u32::MAX);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::new(&Cart::new(), &Catalog::sample());
        assert!(view.is_empty());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.subtotal, "฿0.00");
    }
}
