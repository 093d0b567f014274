//! Derived catalog views: filtering and sorting.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::types::{CatalogItem, ItemType};

/// Item-type selector. `All` disables type filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    #[default]
    All,
    Worksheet,
    Course,
    Comic,
}

impl TypeFilter {
    /// All selector values, in display order.
    pub const ALL: [Self; 4] = [Self::All, Self::Worksheet, Self::Course, Self::Comic];

    /// Whether an item of type `ty` passes this filter.
    #[must_use]
    pub const fn matches(self, ty: ItemType) -> bool {
        matches!(
            (self, ty),
            (Self::All, _)
                | (Self::Worksheet, ItemType::Worksheet)
                | (Self::Course, ItemType::Course)
                | (Self::Comic, ItemType::Comic)
        )
    }

    /// Wire name used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Worksheet => "worksheet",
            Self::Course => "course",
            Self::Comic => "comic",
        }
    }

    /// Shop-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "ทั้งหมด",
            Self::Worksheet => ItemType::Worksheet.label(),
            Self::Course => ItemType::Course.label(),
            Self::Comic => ItemType::Comic.label(),
        }
    }
}

impl From<ItemType> for TypeFilter {
    fn from(ty: ItemType) -> Self {
        match ty {
            ItemType::Worksheet => Self::Worksheet,
            ItemType::Course => Self::Course,
            ItemType::Comic => Self::Comic,
        }
    }
}

impl std::fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            other => other
                .parse::<ItemType>()
                .map(Self::from)
                .map_err(|_| format!("invalid type filter: {s}")),
        }
    }
}

/// Sort order for catalog views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Bestsellers first.
    #[default]
    Popular,
    /// New arrivals first.
    New,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

impl SortKey {
    /// All sort keys, in display order.
    pub const ALL: [Self; 4] = [Self::Popular, Self::New, Self::PriceAsc, Self::PriceDesc];

    /// Wire name used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::New => "new",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }

    /// Shop-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popular => "ยอดนิยม",
            Self::New => "มาใหม่",
            Self::PriceAsc => "ราคาต่ำ-สูง",
            Self::PriceDesc => "ราคาสูง-ต่ำ",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(Self::Popular),
            "new" => Ok(Self::New),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            _ => Err(format!("invalid sort key: {s}")),
        }
    }
}

/// User-controlled filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Free-text search; matched case-insensitively after trimming.
    pub query: String,
    pub item_type: TypeFilter,
    pub only_digital: bool,
}

impl CatalogFilter {
    /// Whether an item passes every active predicate.
    ///
    /// `lower_query` is the trimmed, lower-cased query (empty when inactive).
    fn accepts(&self, item: &CatalogItem, lower_query: &str) -> bool {
        self.item_type.matches(item.item_type)
            && (!self.only_digital || item.is_digital)
            && (lower_query.is_empty() || item.matches_query(lower_query))
    }
}

/// Compute the filtered, sorted view of `items`.
///
/// Pure: the same inputs always produce the same output. Sorting is stable,
/// so items with equal sort keys keep their catalog order.
#[must_use]
pub fn derive_view<'a>(
    items: &'a [CatalogItem],
    filter: &CatalogFilter,
    sort: SortKey,
) -> Vec<&'a CatalogItem> {
    let lower_query = filter.query.trim().to_lowercase();

    let mut view: Vec<&CatalogItem> = items
        .iter()
        .filter(|item| filter.accepts(item, &lower_query))
        .collect();

    match sort {
        SortKey::Popular => view.sort_by_key(|item| Reverse(item.is_bestseller)),
        SortKey::New => view.sort_by_key(|item| Reverse(item.is_new)),
        SortKey::PriceAsc => view.sort_by_key(|item| item.price),
        SortKey::PriceDesc => view.sort_by_key(|item| Reverse(item.price)),
    }

    view
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn ids(view: &[&CatalogItem]) -> Vec<String> {
        view.iter().map(|i| i.id.to_string()).collect()
    }

    fn filter(query: &str, item_type: TypeFilter, only_digital: bool) -> CatalogFilter {
        CatalogFilter {
            query: query.to_owned(),
            item_type,
            only_digital,
        }
    }

    #[test]
    fn test_default_view_is_whole_catalog_bestsellers_first() {
        let catalog = Catalog::sample();
        let view = catalog.derive_view(&CatalogFilter::default(), SortKey::Popular);
        assert_eq!(
            ids(&view),
            ["wks-001", "crs-101", "wks-002", "crs-102", "cmc-201", "cmc-202"]
        );
    }

    #[test]
    fn test_new_sort_puts_new_items_first_stably() {
        let catalog = Catalog::sample();
        let view = catalog.derive_view(&CatalogFilter::default(), SortKey::New);
        assert_eq!(
            ids(&view),
            ["wks-002", "cmc-202", "wks-001", "crs-101", "crs-102", "cmc-201"]
        );
    }

    #[test]
    fn test_price_sorts() {
        let catalog = Catalog::sample();
        let asc = catalog.derive_view(&CatalogFilter::default(), SortKey::PriceAsc);
        assert_eq!(
            ids(&asc),
            ["wks-001", "wks-002", "cmc-202", "cmc-201", "crs-101", "crs-102"]
        );

        let desc = catalog.derive_view(&CatalogFilter::default(), SortKey::PriceDesc);
        assert_eq!(
            ids(&desc),
            ["crs-102", "crs-101", "cmc-201", "cmc-202", "wks-002", "wks-001"]
        );
    }

    #[test]
    fn test_price_ties_keep_catalog_order() {
        let mut items = Catalog::sample().items().to_vec();
        for item in &mut items {
            item.price = rust_decimal::Decimal::from(100);
        }
        let original: Vec<&CatalogItem> = items.iter().collect();

        let asc = derive_view(&items, &CatalogFilter::default(), SortKey::PriceAsc);
        let desc = derive_view(&items, &CatalogFilter::default(), SortKey::PriceDesc);
        assert_eq!(ids(&asc), ids(&original));
        assert_eq!(ids(&desc), ids(&original));
    }

    #[test]
    fn test_type_filter() {
        let catalog = Catalog::sample();
        let view = catalog.derive_view(
            &filter("", TypeFilter::Course, false),
            SortKey::PriceAsc,
        );
        assert_eq!(ids(&view), ["crs-101", "crs-102"]);
        assert!(view.iter().all(|i| i.item_type == ItemType::Course));
    }

    #[test]
    fn test_only_digital_filter() {
        let mut items = Catalog::sample().items().to_vec();
        if let Some(item) = items.get_mut(4) {
            item.is_digital = false;
        }

        let view = derive_view(&items, &filter("", TypeFilter::All, true), SortKey::Popular);
        assert_eq!(view.len(), 5);
        assert!(view.iter().all(|i| i.is_digital));
        assert!(view.iter().all(|i| i.id.as_str() != "cmc-201"));
    }

    #[test]
    fn test_query_matches_grade_label() {
        let catalog = Catalog::sample();
        let view = catalog.derive_view(&filter("ป.3", TypeFilter::All, false), SortKey::Popular);
        assert_eq!(ids(&view), ["wks-001"]);
        for item in &view {
            assert!(
                item.title.contains("ป.3")
                    || item.description.contains("ป.3")
                    || item.tags.iter().any(|t| t.contains("ป.3"))
            );
        }
    }

    #[test]
    fn test_query_matches_tags_and_description() {
        let catalog = Catalog::sample();

        // "การ์ตูน" appears in crs-101's title and tags and in cmc-201's tags.
        let view = catalog.derive_view(
            &filter("การ์ตูน", TypeFilter::All, false),
            SortKey::PriceAsc,
        );
        assert_eq!(ids(&view), ["cmc-201", "crs-101"]);

        // "pdf" only appears (upper-cased) in wks-001's description.
        let view = catalog.derive_view(&filter("pdf", TypeFilter::All, false), SortKey::Popular);
        assert_eq!(ids(&view), ["wks-001"]);
    }

    #[test]
    fn test_query_is_trimmed_and_blank_means_inactive() {
        let catalog = Catalog::sample();
        let blank = catalog.derive_view(&filter("   ", TypeFilter::All, false), SortKey::Popular);
        assert_eq!(blank.len(), catalog.len());

        let padded = catalog.derive_view(&filter("  PDF  ", TypeFilter::All, false), SortKey::Popular);
        assert_eq!(ids(&padded), ["wks-001"]);
    }

    #[test]
    fn test_filters_compose_conjunctively() {
        let catalog = Catalog::sample();
        let view = catalog.derive_view(
            &filter("วิทย", TypeFilter::Comic, true),
            SortKey::Popular,
        );
        assert_eq!(ids(&view), ["cmc-202"]);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let catalog = Catalog::sample();
        let view = catalog.derive_view(
            &filter("no such thing", TypeFilter::All, false),
            SortKey::Popular,
        );
        assert!(view.is_empty());
    }

    #[test]
    fn test_derive_view_is_pure() {
        let catalog = Catalog::sample();
        let f = filter("ป", TypeFilter::All, true);
        for sort in SortKey::ALL {
            assert_eq!(
                ids(&catalog.derive_view(&f, sort)),
                ids(&catalog.derive_view(&f, sort))
            );
        }
    }

    #[test]
    fn test_results_satisfy_all_predicates_for_every_combination() {
        let catalog = Catalog::sample();
        for item_type in TypeFilter::ALL {
            for only_digital in [false, true] {
                for query in ["", "ป.", "วิทย", "การ์ตูน", "x"] {
                    let f = filter(query, item_type, only_digital);
                    for item in catalog.derive_view(&f, SortKey::Popular) {
                        assert!(item_type.matches(item.item_type));
                        assert!(!only_digital || item.is_digital);
                        assert!(query.is_empty() || item.matches_query(&query.to_lowercase()));
                        assert!(catalog.get(&item.id).is_some());
                    }
                }
            }
        }
    }

    #[test]
    fn test_selector_strings_parse() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        for ty in TypeFilter::ALL {
            assert_eq!(ty.as_str().parse::<TypeFilter>().unwrap(), ty);
        }
        assert!("cheapest".parse::<SortKey>().is_err());
        assert!("book".parse::<TypeFilter>().is_err());
    }
}
