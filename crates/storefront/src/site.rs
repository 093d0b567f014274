//! Static site content: branding, social links, payment instructions, FAQ.

/// A question and answer shown in the FAQ section.
#[derive(Clone, Debug)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Social network links shown in the header and contact section.
#[derive(Clone, Debug)]
pub struct SocialLinks {
    pub facebook: &'static str,
    pub line: &'static str,
    pub youtube: &'static str,
}

/// Shop branding and copy.
///
/// Everything except the checkout link is fixed text; the checkout link comes
/// from configuration.
#[derive(Clone, Debug)]
pub struct SiteInfo {
    pub brand: &'static str,
    pub tagline: &'static str,
    pub highlight: &'static str,
    pub social: SocialLinks,
    /// How to pay (shown under the cart total).
    pub payment_how_to: &'static str,
    /// External hand-off target for the checkout button.
    pub checkout_url: String,
    pub faq: Vec<FaqEntry>,
}

impl SiteInfo {
    /// Site content with the given checkout link.
    #[must_use]
    pub fn new(checkout_url: impl Into<String>) -> Self {
        Self {
            brand: "EduCartoon",
            tagline: "แหล่งรวมใบงาน คอร์สออนไลน์ และหนังสือการ์ตูนเพื่อการเรียนรู้สนุก ๆ",
            highlight: "เปิดตัว! คอลเลกชันใบงานวิทยาศาสตร์ ป.4-6",
            social: SocialLinks {
                facebook: "https://facebook.com/",
                line: "https://line.me/ti/p/",
                youtube: "https://youtube.com/@",
            },
            payment_how_to: "โอนผ่าน PromptPay แล้วแนบสลิปในกล่องข้อความ หรือส่งมาที่ LINE",
            checkout_url: checkout_url.into(),
            faq: vec![
                FaqEntry {
                    question: "ได้ไฟล์เมื่อไหร่?",
                    answer: "สินค้าดิจิทัลจะได้รับลิงก์ดาวน์โหลดทันทีหลังชำระเงิน",
                },
                FaqEntry {
                    question: "นำไปใช้เชิงพาณิชย์ได้ไหม?",
                    answer: "ใช้สอนในห้องเรียน/ครอบครัวได้ หากต้องการลิขสิทธิ์เพิ่มเติมติดต่อเรา",
                },
                FaqEntry {
                    question: "ออกใบเสร็จได้หรือไม่?",
                    answer: "ได้ แจ้งรายละเอียดในฟอร์มสั่งซื้อได้เลย",
                },
            ],
        }
    }

    /// Whether checkout still points at the placeholder link.
    #[must_use]
    pub fn checkout_is_placeholder(&self) -> bool {
        self.checkout_url == educart_core::PLACEHOLDER_CHECKOUT_URL
    }
}
