//! Shopping cart state.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s with at most one line per
//! item id and every quantity at least 1. Lines reference catalog items by id
//! only; a line whose id is missing from the catalog is tolerated and counts
//! as zero toward totals.
//!
//! [`CartManager`] wraps a cart together with a [`crate::KeyValueStore`] and
//! writes the cart back after every mutation.

mod manager;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::types::{CatalogItem, ItemId, Price};

pub use manager::{CART_STORAGE_KEY, CartManager};

/// Checkout link used until a real payment page is configured.
pub const PLACEHOLDER_CHECKOUT_URL: &str = "#";

/// One item selection: an item id and a quantity of at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ItemId,
    pub qty: u32,
}

impl CartLine {
    /// Create a line, raising `qty` to 1 if needed.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, qty: u32) -> Self {
        Self {
            id: id.into(),
            qty: qty.max(1),
        }
    }
}

/// Stored line shape, lenient about quantity so out-of-range values can be
/// normalized instead of rejected.
#[derive(Deserialize)]
struct StoredLine {
    id: ItemId,
    qty: i64,
}

/// A cart line paired with its catalog item, if the item still exists.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedLine<'a> {
    pub line: &'a CartLine,
    pub item: Option<&'a CatalogItem>,
}

impl ResolvedLine<'_> {
    /// `qty × price`, or zero when the item is missing from the catalog.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item
            .map_or(Decimal::ZERO, |item| item.price * Decimal::from(self.line.qty))
    }
}

/// Ordered cart lines (first added first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from arbitrary lines, merging repeated ids (quantities are
    /// summed, first position kept) and raising quantities below 1 to 1.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add_item(line.id, line.qty);
        }
        cart
    }

    /// Add `qty` of an item.
    ///
    /// An existing line is incremented in place; otherwise a new line is
    /// appended. A quantity of 0 is treated as 1. Quantities saturate at
    /// `u32::MAX`.
    pub fn add_item(&mut self, id: impl Into<ItemId>, qty: u32) {
        let id = id.into();
        let qty = qty.max(1);
        match self.lines.iter_mut().find(|line| line.id == id) {
            Some(line) => line.qty = line.qty.saturating_add(qty),
            None => self.lines.push(CartLine { id, qty }),
        }
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        self.lines.len() != before
    }

    /// Set the quantity of an existing line to `max(1, qty)`.
    ///
    /// Never removes a line. Returns whether a line with `id` exists.
    pub fn set_quantity(&mut self, id: &ItemId, qty: i64) -> bool {
        let Some(line) = self.lines.iter_mut().find(|line| &line.id == id) else {
            return false;
        };
        line.qty = clamp_quantity(qty);
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.qty)).sum()
    }

    /// Sum of `qty × price` over all lines. Lines whose id is not in the
    /// catalog contribute zero.
    #[must_use]
    pub fn total(&self, catalog: &Catalog) -> Decimal {
        self.resolve(catalog)
            .iter()
            .map(ResolvedLine::line_total)
            .sum()
    }

    /// [`Cart::total`] tagged with the catalog currency.
    #[must_use]
    pub fn total_price(&self, catalog: &Catalog) -> Price {
        Price::new(self.total(catalog), catalog.currency())
    }

    /// Pair each line with its catalog item.
    #[must_use]
    pub fn resolve<'a>(&'a self, catalog: &'a Catalog) -> Vec<ResolvedLine<'a>> {
        self.lines
            .iter()
            .map(|line| ResolvedLine {
                line,
                item: catalog.get(&line.id),
            })
            .collect()
    }

    /// Ids of lines that reference items missing from the catalog.
    #[must_use]
    pub fn dangling_ids<'a>(&'a self, catalog: &Catalog) -> Vec<&'a ItemId> {
        self.lines
            .iter()
            .filter(|line| catalog.get(&line.id).is_none())
            .map(|line| &line.id)
            .collect()
    }

    /// Serialize as a JSON array of `{"id": .., "qty": ..}`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.lines)
    }

    /// Parse the layout written by [`Cart::to_json`].
    ///
    /// Quantities below 1 are raised to 1 and repeated ids are merged, so the
    /// result always satisfies the cart invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not an array of `{id, qty}` records with
    /// integer quantities.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let stored: Vec<StoredLine> = serde_json::from_str(json)?;
        Ok(Self::from_lines(stored.into_iter().map(|line| CartLine {
            id: line.id,
            qty: clamp_quantity(line.qty),
        })))
    }
}

fn clamp_quantity(qty: i64) -> u32 {
    u32::try_from(qty.max(1)).unwrap_or(u32::MAX)
}
