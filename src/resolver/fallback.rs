use lazy_static::lazy_static;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::core::config::FallbackConfig;
use crate::nlp::intent::{IntentDecision, IntentLabel, KeywordGroup};

lazy_static! {
    pub static ref DEFAULT_PRODUCT_KEYWORDS: Vec<&'static str> = vec![
        "mua", "bán", "sản phẩm", "giá", "bao nhiêu",
        "shop", "quà", "lưu niệm", "ly", "tượng", "đồ trang trí", "móc khóa",
    ];
    pub static ref DEFAULT_STORE_KEYWORDS: Vec<&'static str> = vec![
        "địa chỉ", "mở cửa", "đóng cửa", "ở đâu",
        "liên hệ", "giờ làm việc", "cửa hàng", "map",
    ];
}


pub struct FallbackResolver {
    product_keywords: Vec<String>,
    store_keywords: Vec<String>,
}

impl FallbackResolver {
    pub fn new(product_keywords: Vec<String>, store_keywords: Vec<String>) -> Self {
        Self {
            product_keywords: product_keywords.iter().map(|k| fold_case(k)).collect(),
            store_keywords: store_keywords.iter().map(|k| fold_case(k)).collect(),
        }
    }

    pub fn from_config(config: &FallbackConfig) -> Self {
        Self::new(config.product_keywords.clone(), config.store_keywords.clone())
    }

    pub fn match_group(&self, raw_message: &str) -> Option<KeywordGroup> {
        let message = fold_case(raw_message);

        if let Some(keyword) = self.product_keywords.iter().find(|k| message.contains(k.as_str())) {
            debug!("Product keyword {:?} matched", keyword);
            return Some(KeywordGroup::Product);
        }
        if let Some(keyword) = self.store_keywords.iter().find(|k| message.contains(k.as_str())) {
            debug!("Store keyword {:?} matched", keyword);
            return Some(KeywordGroup::Store);
        }
        None
    }

    pub fn resolve(&self, raw_message: &str, classifier_intent: IntentLabel) -> IntentLabel {
        if !classifier_intent.is_unknown() {
            return classifier_intent;
        }
        match self.match_group(raw_message) {
            Some(group) => group.intent().into(),
            None => IntentLabel::unknown(),
        }
    }


    pub fn decide(&self, raw_message: &str, classifier_intent: IntentLabel, confidence: f64) -> IntentDecision {
        if !classifier_intent.is_unknown() {
            return IntentDecision::Classified {
                label: classifier_intent,
                confidence,
            };
        }
        match self.match_group(raw_message) {
            Some(group) => IntentDecision::KeywordFallback { group, confidence },
            None => IntentDecision::Unresolved { confidence },
        }
    }
}

impl Default for FallbackResolver {
    fn default() -> Self {
        Self::from_config(&FallbackConfig::default())
    }
}

fn fold_case(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_overrides_classifier() {
        let resolver = FallbackResolver::default();
        for message in ["giá bao nhiêu", "địa chỉ ở đâu", "xyz", ""] {
            assert_eq!(resolver.resolve(message, "store_info".into()), "store_info");
            assert_eq!(resolver.resolve(message, "greeting".into()), "greeting");
        }
    }

    #[test]
    fn test_product_keywords() {
        let resolver = FallbackResolver::default();
        assert_eq!(resolver.resolve("giá bao nhiêu", IntentLabel::unknown()), "find_product");
        assert_eq!(resolver.resolve("Có MÓC KHÓA không", IntentLabel::unknown()), "find_product");
    }

    #[test]
    fn test_store_keywords() {
        let resolver = FallbackResolver::default();
        assert_eq!(resolver.resolve("Địa chỉ ở đâu vậy", IntentLabel::unknown()), "store_info");
        assert_eq!(resolver.resolve("mấy giờ mở cửa", IntentLabel::unknown()), "store_info");
    }

    #[test]
    fn test_product_priority_over_store() {
        let resolver = FallbackResolver::default();
        let message = "cửa hàng có bán ly không";
        assert_eq!(resolver.match_group(message), Some(KeywordGroup::Product));
        assert_eq!(resolver.resolve(message, IntentLabel::unknown()), "find_product");
    }

    #[test]
    fn test_no_keyword_stays_unknown() {
        let resolver = FallbackResolver::default();
        assert!(resolver.resolve("abc", IntentLabel::unknown()).is_unknown());
    }

    #[test]
    fn test_diacritics_are_significant() {
        let resolver = FallbackResolver::default();
        assert_eq!(resolver.match_group("gia dinh"), None);
    }

    #[test]
    fn test_decomposed_message() {
        let resolver = FallbackResolver::default();
        let decomposed: String = "địa chỉ".nfd().collect();
        assert_eq!(resolver.match_group(&decomposed), Some(KeywordGroup::Store));
    }

    #[test]
    fn test_custom_keywords() {
        let resolver = FallbackResolver::new(vec!["Gấu bông".into()], vec!["hotline".into()]);
        assert_eq!(resolver.match_group("có gấu bông không"), Some(KeywordGroup::Product));
        assert_eq!(resolver.match_group("số HOTLINE"), Some(KeywordGroup::Store));
        assert_eq!(resolver.match_group("giá bao nhiêu"), None);
    }

    #[test]
    fn test_decide_tags_stage() {
        let resolver = FallbackResolver::default();
        assert_eq!(
            resolver.decide("mua ly", "greeting".into(), 0.9),
            IntentDecision::Classified { label: "greeting".into(), confidence: 0.9 }
        );
        assert_eq!(
            resolver.decide("mua ly", IntentLabel::unknown(), 0.4),
            IntentDecision::KeywordFallback { group: KeywordGroup::Product, confidence: 0.4 }
        );
        assert_eq!(
            resolver.decide("abc", IntentLabel::unknown(), 0.4),
            IntentDecision::Unresolved { confidence: 0.4 }
        );
    }
}
