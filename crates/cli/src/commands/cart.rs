//! Cart commands.
//!
//! The cart is kept in the key-value store (see [`crate::store::FileStore`])
//! under the `cart` key and survives between invocations.
//!
//! # Usage
//!
//! ```bash
//! educart cart add wks-001 --qty 2
//! educart cart set wks-001 5
//! educart cart remove wks-001
//! educart cart show
//! educart checkout
//! ```

use std::io::Write;

use educart_core::{CartManager, Catalog, ItemId, KeyValueStore, PLACEHOLDER_CHECKOUT_URL, Price};

use super::CliError;

/// Print the cart lines and total.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn show<S: KeyValueStore>(
    manager: &CartManager<S>,
    catalog: &Catalog,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let cart = manager.cart();
    if cart.is_empty() {
        writeln!(out, "ตะกร้าว่าง")?;
        return Ok(());
    }

    for resolved in cart.resolve(catalog) {
        let line_total = Price::new(resolved.line_total(), catalog.currency());
        match resolved.item {
            Some(item) => writeln!(
                out,
                "{} x {} ({})  {}",
                resolved.line.qty, item.title, item.id, line_total
            )?,
            None => writeln!(
                out,
                "{} x {} (ไม่มีในแคตตาล็อกแล้ว)  {}",
                resolved.line.qty, resolved.line.id, line_total
            )?,
        }
    }
    writeln!(
        out,
        "รวม {} ชิ้น  {}",
        manager.item_count(),
        manager.total_price(catalog)
    )?;
    Ok(())
}

/// Add `qty` of a catalog item.
///
/// # Errors
///
/// Returns `CliError::UnknownItem` if `id` is not in the catalog, or an error
/// if writing to `out` fails.
pub fn add<S: KeyValueStore>(
    manager: &mut CartManager<S>,
    catalog: &Catalog,
    id: &str,
    qty: u32,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let id = ItemId::new(id);
    let Some(item) = catalog.get(&id) else {
        return Err(CliError::UnknownItem(id.to_string()));
    };

    manager.add_item(id.clone(), qty);
    let quantity = manager.cart().get(&id).map_or(0, |line| line.qty);
    writeln!(out, "{}: {} ชิ้นในตะกร้า", item.title, quantity)?;
    Ok(())
}

/// Remove an item's line. Removing something not in the cart is a no-op.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn remove<S: KeyValueStore>(
    manager: &mut CartManager<S>,
    id: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if manager.remove_item(&ItemId::new(id)) {
        writeln!(out, "ลบ {id} ออกจากตะกร้าแล้ว")?;
    } else {
        writeln!(out, "{id} ไม่ได้อยู่ในตะกร้า")?;
    }
    Ok(())
}

/// Set an item's quantity (values below 1 become 1).
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn set<S: KeyValueStore>(
    manager: &mut CartManager<S>,
    id: &str,
    qty: i64,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let id = ItemId::new(id);
    if manager.set_quantity(&id, qty) {
        let quantity = manager.cart().get(&id).map_or(0, |line| line.qty);
        writeln!(out, "{id}: {quantity} ชิ้น")?;
    } else {
        writeln!(out, "{id} ไม่ได้อยู่ในตะกร้า")?;
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn clear<S: KeyValueStore>(
    manager: &mut CartManager<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    manager.clear();
    writeln!(out, "ล้างตะกร้าแล้ว")?;
    Ok(())
}

/// Print the cart summary and where to pay.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn checkout<S: KeyValueStore>(
    manager: &CartManager<S>,
    catalog: &Catalog,
    checkout_url: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    show(manager, catalog, out)?;
    if manager.cart().is_empty() {
        return Ok(());
    }

    tracing::info!(
        count = manager.item_count(),
        total = %manager.total_price(catalog),
        "Checkout hand-off"
    );

    if checkout_url == PLACEHOLDER_CHECKOUT_URL {
        writeln!(out, "ยังไม่ได้ตั้งค่าลิงก์ชำระเงิน (EDUCART_CHECKOUT_URL)")?;
    } else {
        writeln!(out, "ชำระเงินที่: {checkout_url}")?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use educart_core::{CART_STORAGE_KEY, MemoryStore};

    use super::*;

    fn output(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut out = Vec::new();
        f(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_then_show() {
        let catalog = Catalog::sample();
        let mut manager = CartManager::load(MemoryStore::new());

        let text = output(|out| add(&mut manager, &catalog, "wks-001", 1, out).unwrap());
        assert!(text.contains("1 ชิ้นในตะกร้า"));
        let text = output(|out| add(&mut manager, &catalog, "wks-001", 2, out).unwrap());
        assert!(text.contains("3 ชิ้นในตะกร้า"));

        let text = output(|out| show(&manager, &catalog, out).unwrap());
        assert!(text.contains("3 x ใบงานคณิต ป.3 ชุดที่ 1 (wks-001)  ฿237.00"));
        assert!(text.contains("รวม 3 ชิ้น  ฿237.00"));
        assert_eq!(
            manager.store().raw(CART_STORAGE_KEY),
            Some(r#"[{"id":"wks-001","qty":3}]"#)
        );
    }

    #[test]
    fn test_add_unknown_item_is_refused() {
        let catalog = Catalog::sample();
        let mut manager = CartManager::load(MemoryStore::new());
        let mut out = Vec::new();

        let err = add(&mut manager, &catalog, "nope-1", 1, &mut out).unwrap_err();
        assert!(matches!(err, CliError::UnknownItem(_)));
        assert!(manager.cart().is_empty());
    }

    #[test]
    fn test_show_lists_dangling_lines() {
        let catalog = Catalog::sample();
        let store = MemoryStore::new().with_value(
            CART_STORAGE_KEY,
            r#"[{"id":"gone-1","qty":2},{"id":"cmc-201","qty":1}]"#,
        );
        let manager = CartManager::load(store);

        let text = output(|out| show(&manager, &catalog, out).unwrap());
        assert!(text.contains("2 x gone-1 (ไม่มีในแคตตาล็อกแล้ว)  ฿0.00"));
        assert!(text.contains("รวม 3 ชิ้น  ฿199.00"));
    }

    #[test]
    fn test_set_remove_clear() {
        let catalog = Catalog::sample();
        let mut manager = CartManager::load(MemoryStore::new());
        output(|out| add(&mut manager, &catalog, "crs-102", 1, out).unwrap());

        let text = output(|out| set(&mut manager, "crs-102", 0, out).unwrap());
        assert_eq!(text.trim(), "crs-102: 1 ชิ้น");
        let text = output(|out| set(&mut manager, "crs-102", 4, out).unwrap());
        assert_eq!(text.trim(), "crs-102: 4 ชิ้น");
        let text = output(|out| set(&mut manager, "wks-001", 4, out).unwrap());
        assert!(text.contains("ไม่ได้อยู่ในตะกร้า"));

        let text = output(|out| remove(&mut manager, "crs-102", out).unwrap());
        assert!(text.contains("ลบ crs-102"));
        assert!(manager.cart().is_empty());

        output(|out| add(&mut manager, &catalog, "crs-102", 1, out).unwrap());
        output(|out| clear(&mut manager, out).unwrap());
        assert!(manager.cart().is_empty());
        assert_eq!(manager.store().raw(CART_STORAGE_KEY), Some("[]"));
    }

    #[test]
    fn test_checkout() {
        let catalog = Catalog::sample();
        let mut manager = CartManager::load(MemoryStore::new());

        let text = output(|out| checkout(&manager, &catalog, "#", out).unwrap());
        assert_eq!(text.trim(), "ตะกร้าว่าง");

        output(|out| add(&mut manager, &catalog, "crs-101", 1, out).unwrap());
        let text = output(|out| checkout(&manager, &catalog, "#", out).unwrap());
        assert!(text.contains("฿1,290.00"));
        assert!(text.contains("EDUCART_CHECKOUT_URL"));

        let text = output(|out| {
            checkout(&manager, &catalog, "https://pay.example.org/educart", out).unwrap();
        });
        assert!(text.contains("ชำระเงินที่: https://pay.example.org/educart"));
    }
}
