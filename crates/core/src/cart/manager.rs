//! Cart manager: cart state plus best-effort persistence.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::{Cart, CartLine};
use crate::catalog::Catalog;
use crate::storage::KeyValueStore;
use crate::types::{ItemId, Price};

/// Storage key under which the cart is persisted.
pub const CART_STORAGE_KEY: &str = "cart";

/// Owns the authoritative [`Cart`] and mirrors it into a [`KeyValueStore`].
///
/// Every mutating call writes the full line list under [`CART_STORAGE_KEY`].
/// Write failures are logged and otherwise ignored: the in-memory cart stays
/// authoritative and the next successful write brings the store back in sync.
#[derive(Debug)]
pub struct CartManager<S> {
    cart: Cart,
    store: S,
}

impl<S: KeyValueStore> CartManager<S> {
    /// Restore the cart from `store`.
    ///
    /// A missing key, an unreadable store, or a value that does not parse all
    /// yield an empty cart.
    pub fn load(store: S) -> Self {
        let cart = match store.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => Cart::from_json(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Stored cart is malformed, starting with an empty cart");
                Cart::new()
            }),
            Ok(None) => {
                debug!("No stored cart, starting with an empty cart");
                Cart::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, starting with an empty cart");
                Cart::new()
            }
        };

        Self { cart, store }
    }

    /// Add `qty` of an item (0 counts as 1) and persist.
    pub fn add_item(&mut self, id: impl Into<ItemId>, qty: u32) {
        self.cart.add_item(id, qty);
        self.persist();
    }

    /// Remove the line for `id` and persist. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        let removed = self.cart.remove_item(id);
        self.persist();
        removed
    }

    /// Set a line's quantity to `max(1, qty)` and persist. Returns whether the
    /// line exists.
    pub fn set_quantity(&mut self, id: &ItemId, qty: i64) -> bool {
        let found = self.cart.set_quantity(id, qty);
        self.persist();
        found
    }

    /// Empty the cart and persist. The storage key is kept (holding `[]`).
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Current cart state.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// See [`Cart::total`].
    #[must_use]
    pub fn total(&self, catalog: &Catalog) -> Decimal {
        self.cart.total(catalog)
    }

    /// See [`Cart::total_price`].
    #[must_use]
    pub fn total_price(&self, catalog: &Catalog) -> Price {
        self.cart.total_price(catalog)
    }

    /// See [`Cart::item_count`].
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the backing store, e.g. to flush it.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        let value = match self.cart.to_json() {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.store.set(CART_STORAGE_KEY, value) {
            warn!(error = %e, lines = self.cart.lines().len(), "Failed to persist cart");
        }
    }
}
