
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{Catalog, Product, find_products, load_catalog};
use crate::core::config::GiftbotConfig;
use crate::core::error::Result;
use crate::nlp::classifier::IntentClassifier;
use crate::nlp::intent::{BuiltinIntent, IntentDecision, IntentLabel};
use crate::reply::{ReplyComposer, ResponseTable};
use crate::resolver::FallbackResolver;


#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub intent: IntentLabel,
    pub reply: String,
    pub products: Vec<Product>,
}

pub struct ChatContext {
    classifier: IntentClassifier,
    fallback: FallbackResolver,
    catalog: Catalog,
    composer: ReplyComposer,
    max_products: usize,
}

impl ChatContext {
    pub fn new(
        classifier: IntentClassifier,
        fallback: FallbackResolver,
        catalog: Catalog,
        composer: ReplyComposer,
        max_products: usize,
    ) -> Self {
        Self {
            classifier,
            fallback,
            catalog,
            composer,
            max_products,
        }
    }

    pub fn load(config: &GiftbotConfig) -> Result<Self> {
        config.validate()?;

        let classifier = IntentClassifier::load(
            &config.model_path,
            &config.vectorizer_path,
            config.confidence_threshold,
        )?;
        let responses = ResponseTable::load(&config.responses_path)?;
        let catalog = load_catalog(&config.catalog_path)?;

        info!(
            "Chat context ready: {} intents (threshold {}), {} canned responses, {} products",
            classifier.classes().len(),
            classifier.threshold(),
            responses.len(),
            catalog.len()
        );

        Ok(Self::new(
            classifier,
            FallbackResolver::from_config(&config.fallback),
            catalog,
            ReplyComposer::new(responses, config.static_url_prefix.clone()),
            config.max_products,
        ))
    }


    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }


    pub fn decide(&self, message: &str) -> IntentDecision {
        let (classified, confidence) = self.classifier.classify_with_confidence(message);
        let decision = self.fallback.decide(message, classified, confidence);
        debug!("Intent decided by {}: {}", decision.stage(), decision.label());
        decision
    }

    pub fn resolve(&self, message: &str) -> ChatOutcome {
        let intent = self.decide(message).label();

        let products = if intent.builtin() == Some(BuiltinIntent::FindProduct) {
            find_products(message, &self.catalog, self.max_products)
        } else {
            Vec::new()
        };

        let reply = self.composer.respond(message, &intent, &products);

        ChatOutcome {
            intent,
            reply,
            products,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::nlp::classifier::tests::{shop_model, shop_vectorizer};
    use crate::reply::composer::{OUT_OF_SCOPE, PRODUCT_NOT_FOUND};

    pub(crate) fn test_context() -> ChatContext {
        let classifier = IntentClassifier::new(shop_vectorizer(), shop_model(), 0.55).unwrap();
        let responses: ResponseTable = [
            ("greeting".to_string(), "Xin chào! Mình có thể giúp gì?".to_string()),
            ("store_info".to_string(), "Shop mở cửa 8h-21h.".to_string()),
        ]
        .into_iter()
        .collect();
        let catalog = Catalog::new(vec![
            Product::builder(1, "Ly sứ trang trí").price(120000.0).image("ly.jpg").build(),
            Product::builder(2, "Tượng gỗ").description("Tượng Phật gỗ mít").price(250000.0).build(),
            Product::builder(3, "Móc khóa Hội An").category("Quà lưu niệm").price(35000.0).build(),
        ]);

        ChatContext::new(
            classifier,
            FallbackResolver::default(),
            catalog,
            ReplyComposer::new(responses, "/static"),
            5,
        )
    }

    #[test]
    fn test_classified_greeting() {
        let outcome = test_context().resolve("Xin chào shop");
        assert_eq!(outcome.intent, "greeting");
        assert_eq!(outcome.reply, "Xin chào! Mình có thể giúp gì?");
        assert!(outcome.products.is_empty());
    }

    #[test]
    fn test_find_product_with_match() {
        let outcome = test_context().resolve("mua ly");
        assert_eq!(outcome.intent, "find_product");
        assert_eq!(outcome.products.len(), 1);
        assert_eq!(outcome.products[0].id, 1);
        assert!(outcome.reply.contains("<b>Ly sứ trang trí</b> — 120000 VND"));
        assert!(outcome.reply.contains(r#"src="/static/ly.jpg""#));
    }

    #[test]
    fn test_find_product_without_match() {
        let outcome = test_context().resolve("giá xyz123");
        assert_eq!(outcome.intent, "find_product");
        assert!(outcome.products.is_empty());
        assert_eq!(outcome.reply, PRODUCT_NOT_FOUND);
    }

    #[test]
    fn test_keyword_fallback_to_product() {
        let context = test_context();
        let decision = context.decide("bao nhiêu tiền");
        assert!(matches!(decision, IntentDecision::KeywordFallback { .. }));
        assert_eq!(decision.label(), "find_product");
    }

    #[test]
    fn test_keyword_fallback_to_store() {
        let outcome = test_context().resolve("địa chỉ ở đâu");
        assert_eq!(outcome.intent, "store_info");
        assert_eq!(outcome.reply, "Shop mở cửa 8h-21h.");
    }

    #[test]
    fn test_unresolved() {
        let context = test_context();
        assert!(matches!(context.decide("abc"), IntentDecision::Unresolved { .. }));
        let outcome = context.resolve("abc");
        assert!(outcome.intent.is_unknown());
        assert_eq!(outcome.reply, OUT_OF_SCOPE);
    }

    #[test]
    fn test_load_requires_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GiftbotConfig::default();
        config.model_path = dir.path().join("intent_model.json");
        config.vectorizer_path = dir.path().join("vectorizer.json");
        assert!(ChatContext::load(&config).is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GiftbotConfig::default();
        config.model_path = dir.path().join("intent_model.json");
        config.vectorizer_path = dir.path().join("vectorizer.json");
        config.responses_path = dir.path().join("responses_augmented.csv");
        config.catalog_path = dir.path().join("catalog.db");

        shop_model().save(&config.model_path).unwrap();
        shop_vectorizer().save(&config.vectorizer_path).unwrap();
        std::fs::write(&config.responses_path, "intent,response\nstore_info,Mở cửa cả tuần\n").unwrap();
        crate::catalog::store::tests::write_catalog(&config.catalog_path);

        let context = ChatContext::load(&config).unwrap();
        assert_eq!(context.catalog().len(), 3);
        assert_eq!(context.resolve("cửa hàng").reply, "Mở cửa cả tuần");

        let outcome = context.resolve("mua móc khóa");
        assert_eq!(outcome.intent, "find_product");
        assert_eq!(outcome.products[0].name, "Móc khóa Hội An");
        assert!(outcome.reply.contains(r#"src="https://cdn.example.com/moc.png""#));
    }
}
