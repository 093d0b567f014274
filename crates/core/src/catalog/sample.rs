//! Built-in sample catalog.

use rust_decimal::Decimal;

use super::Catalog;
use crate::types::{CatalogItem, CurrencyCode, ItemId, ItemType};

const UNSPLASH: &str = "https://images.unsplash.com";

fn thumb(photo: &str) -> Option<String> {
    Some(format!(
        "{UNSPLASH}/{photo}?w=600&auto=format&fit=crop&q=60"
    ))
}

fn tags(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|&t| t.to_owned()).collect()
}

impl Catalog {
    /// The shop's built-in catalog: two worksheets, two courses, two comics,
    /// priced in Thai baht.
    #[must_use]
    pub fn sample() -> Self {
        let items = vec![
            CatalogItem {
                id: ItemId::new("wks-001"),
                item_type: ItemType::Worksheet,
                title: "ใบงานคณิต ป.3 ชุดที่ 1".to_owned(),
                description: "แบบฝึกหัดบวก ลบ คูณ หาร พร้อมเฉลย ดาวน์โหลดเป็น PDF พิมพ์ได้"
                    .to_owned(),
                price: Decimal::from(79),
                tags: tags(&["คณิต", "ป.3"]),
                thumb: thumb("photo-1584697964154-3f71e66b4a7a"),
                sample_url: Some("#".to_owned()),
                hours: None,
                lessons: None,
                is_digital: true,
                is_physical: false,
                is_bestseller: true,
                is_new: false,
            },
            CatalogItem {
                id: ItemId::new("wks-002"),
                item_type: ItemType::Worksheet,
                title: "ใบงานวิทย์ ป.5 เรื่อง สิ่งมีชีวิต".to_owned(),
                description: "กิจกรรมสืบเสาะหาความรู้ แผ่นกิจกรรม + ใบประเมิน".to_owned(),
                price: Decimal::from(89),
                tags: tags(&["วิทยาศาสตร์", "ป.5"]),
                thumb: thumb("photo-1559757148-5c350d0d3c56"),
                sample_url: Some("#".to_owned()),
                hours: None,
                lessons: None,
                is_digital: true,
                is_physical: false,
                is_bestseller: false,
                is_new: true,
            },
            CatalogItem {
                id: ItemId::new("crs-101"),
                item_type: ItemType::Course,
                title: "วาดการ์ตูนตั้งแต่ 0 ถึงออกเล่มแรก".to_owned(),
                description: "คอร์สวิดีโอ 20 บท + ไฟล์ brush + กลุ่มเฉพาะตอบคำถาม".to_owned(),
                price: Decimal::from(1290),
                tags: tags(&["การ์ตูน", "วาดภาพ", "ผู้เริ่มต้น"]),
                thumb: thumb("photo-1544551763-7ef42006926f"),
                sample_url: None,
                hours: Some(12),
                lessons: Some(45),
                is_digital: true,
                is_physical: false,
                is_bestseller: true,
                is_new: false,
            },
            CatalogItem {
                id: ItemId::new("crs-102"),
                item_type: ItemType::Course,
                title: "ฟิสิกส์สนุก ม.ต้น: แรงและการเคลื่อนที่".to_owned(),
                description: "คอร์สอินเตอร์แอคทีฟ + แบบฝึกหัดออนไลน์ + ใบงานแถม".to_owned(),
                price: Decimal::from(1590),
                tags: tags(&["ฟิสิกส์", "มัธยมต้น"]),
                thumb: thumb("photo-1517976487492-576ea3455634"),
                sample_url: None,
                hours: Some(10),
                lessons: Some(30),
                is_digital: true,
                is_physical: false,
                is_bestseller: false,
                is_new: false,
            },
            CatalogItem {
                id: ItemId::new("cmc-201"),
                item_type: ItemType::Comic,
                title: "นักสืบหมีพูห์ ภาค 1".to_owned(),
                description: "หนังสือการ์ตูนพิมพ์สีทั้งเล่ม พร้อมโค้ดโหลด e-book".to_owned(),
                price: Decimal::from(199),
                tags: tags(&["การ์ตูน", "สืบสวน"]),
                thumb: thumb("photo-1519681393784-d120267933ba"),
                sample_url: None,
                hours: None,
                lessons: None,
                is_digital: true,
                is_physical: true,
                is_bestseller: false,
                is_new: false,
            },
            CatalogItem {
                id: ItemId::new("cmc-202"),
                item_type: ItemType::Comic,
                title: "วิทย์มันส์ซ่า เล่มพิเศษ: ห้องทดลองในครัว".to_owned(),
                description: "คอมิกความรู้ ทดลองง่าย ๆ ในบ้าน เหมาะกับทุกวัย".to_owned(),
                price: Decimal::from(179),
                tags: tags(&["วิทยาศาสตร์", "ครอบครัว"]),
                thumb: thumb("photo-1478737270239-2f02b77fc618"),
                sample_url: None,
                hours: None,
                lessons: None,
                is_digital: true,
                is_physical: false,
                is_bestseller: false,
                is_new: true,
            },
        ];

        Self::indexed(CurrencyCode::THB, items)
    }
}
