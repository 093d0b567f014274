//! The product catalog.
//!
//! A [`Catalog`] is built once at startup (either the built-in sample or a
//! JSON document) and is read-only afterwards. Filtered and sorted views are
//! computed on demand by [`derive_view`].

mod sample;
mod view;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CatalogItem, CurrencyCode, ItemId, Price};

pub use view::{CatalogFilter, SortKey, TypeFilter, derive_view};

/// Errors that can occur when building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two items share the same id.
    #[error("duplicate catalog item id: {0}")]
    DuplicateId(ItemId),

    /// An item has a negative price.
    #[error("catalog item {0} has a negative price")]
    NegativePrice(ItemId),

    /// The catalog document is not valid JSON or does not match the schema.
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serialized catalog layout.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    currency: CurrencyCode,
    items: Vec<CatalogItem>,
}

/// Immutable list of catalog items with an id index.
#[derive(Debug, Clone)]
pub struct Catalog {
    currency: CurrencyCode,
    items: Vec<CatalogItem>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a catalog, enforcing unique ids and non-negative prices.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] or [`CatalogError::NegativePrice`]
    /// when an item violates a catalog invariant.
    pub fn new(currency: CurrencyCode, items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
            if item.price.is_sign_negative() && !item.price.is_zero() {
                return Err(CatalogError::NegativePrice(item.id.clone()));
            }
        }

        Ok(Self::indexed(currency, items))
    }

    /// Build the id index over already-validated items.
    fn indexed(currency: CurrencyCode, items: Vec<CatalogItem>) -> Self {
        let index = items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id.clone(), pos))
            .collect();

        Self {
            currency,
            items,
            index,
        }
    }

    /// Parse a catalog from a JSON document of the form
    /// `{"currency": "THB", "items": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON, or a validation
    /// error from [`Catalog::new`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::new(doc.currency, doc.items)
    }

    /// Serialize the catalog to the same JSON layout [`Catalog::from_json`] reads.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&CatalogDocument {
            currency: self.currency,
            items: self.items.clone(),
        })
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.index.get(id).and_then(|&pos| self.items.get(pos))
    }

    /// All items in catalog order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Catalog currency. Every price in the catalog is in this currency.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Price of an item, tagged with the catalog currency.
    #[must_use]
    pub const fn price_of(&self, item: &CatalogItem) -> Price {
        Price::new(item.price, self.currency)
    }

    /// Filtered and sorted view over this catalog.
    #[must_use]
    pub fn derive_view(&self, filter: &CatalogFilter, sort: SortKey) -> Vec<&CatalogItem> {
        derive_view(&self.items, filter, sort)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_sample_catalog_is_valid() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.currency(), CurrencyCode::THB);

        let ids: Vec<&str> = catalog.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            ["wks-001", "wks-002", "crs-101", "crs-102", "cmc-201", "cmc-202"]
        );
        assert!(Catalog::new(catalog.currency(), catalog.items().to_vec()).is_ok());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::sample();
        let item = catalog.get(&ItemId::new("crs-101")).unwrap();
        assert_eq!(item.price, Decimal::from(1290));
        assert!(catalog.get(&ItemId::new("nope")).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut items = Catalog::sample().items().to_vec();
        let dup = items.first().cloned().unwrap();
        items.push(dup);

        let err = Catalog::new(CurrencyCode::THB, items).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id.as_str() == "wks-001"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut items = Catalog::sample().items().to_vec();
        if let Some(item) = items.get_mut(2) {
            item.price = Decimal::from(-1);
        }

        let err = Catalog::new(CurrencyCode::THB, items).unwrap_err();
        assert!(matches!(err, CatalogError::NegativePrice(id) if id.as_str() == "crs-101"));
    }

    #[test]
    fn test_json_round_trip_preserves_items() {
        let catalog = Catalog::sample();
        let json = catalog.to_json().unwrap();
        let parsed = Catalog::from_json(&json).unwrap();
        assert_eq!(parsed.items(), catalog.items());
        assert_eq!(parsed.currency(), catalog.currency());
    }

    #[test]
    fn test_from_json_defaults_currency_and_flags() {
        let json = r#"{"items": [
            {"id": "x-1", "type": "comic", "title": "T", "description": "D", "price": 10}
        ]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.currency(), CurrencyCode::THB);
        let item = catalog.get(&ItemId::new("x-1")).unwrap();
        assert!(item.tags.is_empty());
        assert!(!item.is_digital);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
