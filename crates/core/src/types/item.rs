//! Catalog item records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ItemId;

/// Kind of product sold by the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Printable worksheet (usually a PDF download).
    Worksheet,
    /// Online video course.
    Course,
    /// Educational comic book.
    Comic,
}

impl ItemType {
    /// All item types, in display order.
    pub const ALL: [Self; 3] = [Self::Worksheet, Self::Course, Self::Comic];

    /// Wire name used in query strings and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Worksheet => "worksheet",
            Self::Course => "course",
            Self::Comic => "comic",
        }
    }

    /// Shop-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Worksheet => "ใบงาน",
            Self::Course => "คอร์ส",
            Self::Comic => "การ์ตูน",
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "worksheet" => Ok(Self::Worksheet),
            "course" => Ok(Self::Course),
            "comic" => Ok(Self::Comic),
            _ => Err(format!("invalid item type: {s}")),
        }
    }
}

/// A purchasable catalog entry.
///
/// Items are defined once when the catalog is built and never mutated.
/// `thumb`, `sample_url`, `hours` and `lessons` are informational and play no
/// part in filtering or sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title: String,
    #[serde(alias = "desc")]
    pub description: String,
    /// Non-negative amount in the catalog currency.
    pub price: Decimal,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(
        default,
        alias = "downloadSample",
        skip_serializing_if = "Option::is_none"
    )]
    pub sample_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lessons: Option<u32>,
    #[serde(default, rename = "digital")]
    pub is_digital: bool,
    #[serde(default, rename = "physical")]
    pub is_physical: bool,
    #[serde(default, rename = "bestseller")]
    pub is_bestseller: bool,
    #[serde(default, rename = "new")]
    pub is_new: bool,
}

impl CatalogItem {
    /// Whether an already lower-cased query is a substring of the lower-cased
    /// title, description, or any tag.
    #[must_use]
    pub fn matches_query(&self, lower_query: &str) -> bool {
        self.title.to_lowercase().contains(lower_query)
            || self.description.to_lowercase().contains(lower_query)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(lower_query))
    }

    /// Delivery format label, e.g. `Digital + หนังสือจริง`.
    #[must_use]
    pub fn format_label(&self) -> String {
        match (self.is_digital, self.is_physical) {
            (true, true) => "Digital + หนังสือจริง".to_owned(),
            (true, false) => "Digital".to_owned(),
            (false, true) => "หนังสือจริง".to_owned(),
            (false, false) => String::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item() -> CatalogItem {
        CatalogItem {
            id: ItemId::new("wks-900"),
            item_type: ItemType::Worksheet,
            title: "Fractions Practice".to_owned(),
            description: "Printable drills WITH answers".to_owned(),
            price: Decimal::from(59),
            tags: vec!["Math".to_owned(), "Grade 4".to_owned()],
            thumb: None,
            sample_url: None,
            hours: None,
            lessons: None,
            is_digital: true,
            is_physical: false,
            is_bestseller: false,
            is_new: false,
        }
    }

    #[test]
    fn test_matches_query_fields() {
        let item = item();
        assert!(item.matches_query("fraction"));
        assert!(item.matches_query("with answers"));
        assert!(item.matches_query("grade 4"));
        assert!(!item.matches_query("science"));
    }

    #[test]
    fn test_item_type_round_trip_strings() {
        for ty in ItemType::ALL {
            assert_eq!(ty.as_str().parse::<ItemType>().unwrap(), ty);
        }
        assert!("all".parse::<ItemType>().is_err());
    }

    #[test]
    fn test_deserialize_accepts_storefront_field_names() {
        let json = r##"{
            "id": "wks-001",
            "type": "worksheet",
            "title": "t",
            "desc": "d",
            "price": 79,
            "tags": ["a"],
            "downloadSample": "#",
            "digital": true,
            "bestseller": true
        }"##;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.description, "d");
        assert_eq!(item.sample_url.as_deref(), Some("#"));
        assert_eq!(item.price, Decimal::from(79));
        assert!(item.is_digital && item.is_bestseller);
        assert!(!item.is_physical && !item.is_new);
    }

    #[test]
    fn test_format_label() {
        let mut item = item();
        assert_eq!(item.format_label(), "Digital");
        item.is_physical = true;
        assert_eq!(item.format_label(), "Digital + หนังสือจริง");
        item.is_digital = false;
        item.is_physical = false;
        assert_eq!(item.format_label(), "");
    }
}
