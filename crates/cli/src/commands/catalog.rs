//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! # Bestsellers first (default)
//! educart catalog
//!
//! # Courses, most expensive first
//! educart catalog --type course --sort price_desc
//!
//! # Search titles, descriptions and tags
//! educart catalog --query "ป.3"
//!
//! # Item details
//! educart show crs-101
//! ```

use std::io::Write;

use educart_core::{Catalog, CatalogFilter, CatalogItem, ItemId, SortKey};

use super::CliError;

/// Print the filtered, sorted catalog, one item per line.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list(
    catalog: &Catalog,
    filter: &CatalogFilter,
    sort: SortKey,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let view = catalog.derive_view(filter, sort);
    tracing::debug!(results = view.len(), sort = %sort, "Catalog view derived");

    if view.is_empty() {
        writeln!(out, "ไม่พบสินค้าที่ตรงกับการค้นหา")?;
        return Ok(());
    }

    for item in view {
        writeln!(
            out,
            "{:<8}  {:<7}  {}  {}{}",
            item.id.as_str(),
            item.item_type.label(),
            item.title,
            catalog.price_of(item),
            badges(item),
        )?;
    }
    Ok(())
}

/// Print everything known about one item.
///
/// # Errors
///
/// Returns `CliError::UnknownItem` if `id` is not in the catalog, or an error
/// if writing to `out` fails.
pub fn show(catalog: &Catalog, id: &str, out: &mut impl Write) -> Result<(), CliError> {
    let item = catalog
        .get(&ItemId::new(id))
        .ok_or_else(|| CliError::UnknownItem(id.to_string()))?;

    writeln!(out, "{}{}", item.title, badges(item))?;
    writeln!(out, "รหัส: {}  ประเภท: {}", item.id, item.item_type.label())?;
    writeln!(out, "ราคา: {}", catalog.price_of(item))?;
    writeln!(out, "{}", item.description)?;

    let format = item.format_label();
    if !format.is_empty() {
        writeln!(out, "รูปแบบ: {format}")?;
    }
    if let Some(hours) = item.hours {
        writeln!(out, "ความยาว: {hours} ชั่วโมง")?;
    }
    if let Some(lessons) = item.lessons {
        writeln!(out, "จำนวนบทเรียน: {lessons}")?;
    }
    if !item.tags.is_empty() {
        writeln!(out, "แท็ก: {}", item.tags.join(", "))?;
    }
    if let Some(sample) = &item.sample_url {
        writeln!(out, "ตัวอย่าง: {sample}")?;
    }
    Ok(())
}

fn badges(item: &CatalogItem) -> String {
    let mut badges = String::new();
    if item.is_bestseller {
        badges.push_str("  [ขายดี]");
    }
    if item.is_new {
        badges.push_str("  [มาใหม่]");
    }
    badges
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use educart_core::TypeFilter;

    use super::*;

    fn run_list(filter: &CatalogFilter, sort: SortKey) -> String {
        let mut out = Vec::new();
        list(&Catalog::sample(), filter, sort, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn ids(output: &str) -> Vec<&str> {
        output
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .collect()
    }

    #[test]
    fn test_list_default_puts_bestsellers_first() {
        let output = run_list(&CatalogFilter::default(), SortKey::Popular);
        assert_eq!(
            ids(&output),
            vec!["wks-001", "crs-101", "wks-002", "crs-102", "cmc-201", "cmc-202"]
        );
        assert!(output.contains("฿79.00"));
        assert!(output.contains("[ขายดี]"));
    }

    #[test]
    fn test_list_filtered() {
        let filter = CatalogFilter {
            item_type: TypeFilter::Worksheet,
            ..CatalogFilter::default()
        };
        let output = run_list(&filter, SortKey::PriceDesc);
        assert_eq!(ids(&output), vec!["wks-002", "wks-001"]);
    }

    #[test]
    fn test_list_no_results() {
        let filter = CatalogFilter {
            query: "zzzz".to_string(),
            ..CatalogFilter::default()
        };
        let output = run_list(&filter, SortKey::Popular);
        assert_eq!(output.trim(), "ไม่พบสินค้าที่ตรงกับการค้นหา");
    }

    #[test]
    fn test_show_course() {
        let mut out = Vec::new();
        show(&Catalog::sample(), "crs-101", &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("฿1,290.00"));
        assert!(output.contains("ความยาว: 12 ชั่วโมง"));
        assert!(output.contains("จำนวนบทเรียน: 45"));
    }

    #[test]
    fn test_show_unknown_item() {
        let mut out = Vec::new();
        let err = show(&Catalog::sample(), "nope-1", &mut out).unwrap_err();
        assert!(matches!(err, CliError::UnknownItem(id) if id == "nope-1"));
    }
}
