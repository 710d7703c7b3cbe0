//! Free-text classification by keyword containment.
//!
//! The first category whose keyword list has any
//! substring in the text wins, product keywords first. Quick questions skip
//! this entirely since they carry their category.

use crate::stylist::rules::Category;

/// Product-related words. A hit routes to `Advice` and attaches products.
pub const ADVICE_KEYWORDS: &[&str] = &["商品", "アイテム", "おすすめ", "買う", "購入", "服"];
pub const REASON_KEYWORDS: &[&str] = &["なぜ", "理由", "どうして", "診断結果"];
pub const STYLING_KEYWORDS: &[&str] = &["合わせ", "コーデ", "着こなし", "ワードローブ"];

const TABLE: &[(Category, &[&str])] = &[
    (Category::Advice, ADVICE_KEYWORDS),
    (Category::Reason, REASON_KEYWORDS),
    (Category::Styling, STYLING_KEYWORDS),
];

/// Returns `None` when nothing matches; the caller answers with the fallback.
pub fn classify(text: &str) -> Option<Category> {
    TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
}

pub fn is_product_related(text: &str) -> bool {
    ADVICE_KEYWORDS.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osusume_routes_to_advice() {
        assert_eq!(classify("おすすめを教えて"), Some(Category::Advice));
        assert!(is_product_related("おすすめを教えて"));
    }

    #[test]
    fn test_product_keywords_win_over_others() {
        // contains both なぜ and アイテム
        assert_eq!(classify("なぜこのアイテムなの？"), Some(Category::Advice));
    }

    #[test]
    fn test_reason_and_styling_keywords() {
        assert_eq!(classify("どうしてこうなったの"), Some(Category::Reason));
        assert_eq!(classify("手持ちとの着こなしは？"), Some(Category::Styling));
    }

    #[test]
    fn test_unmatched_text_is_unclassified() {
        assert_eq!(classify("こんにちは"), None);
        assert_eq!(classify(""), None);
        assert!(!is_product_related("こんにちは"));
    }
}
