

pub mod catalog;
pub mod core;
pub mod engine;
pub mod nlp;
pub mod reply;
pub mod resolver;
pub mod server;
pub mod training;
pub mod utils;

pub use utils::{safe_truncate, safe_truncate_ellipsis};


pub use catalog::{Catalog, Product};
pub use crate::core::config::GiftbotConfig;
pub use crate::core::error::{GiftbotError, Result};
pub use engine::{ChatContext, ChatOutcome};
pub use nlp::{IntentClassifier, IntentDecision, IntentLabel, normalize};
pub use resolver::FallbackResolver;


pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.55;


pub const DEFAULT_MAX_PRODUCTS: usize = 5;


pub const DEFAULT_PORT: u16 = 5000;


pub const DEFAULT_MODEL_FILE: &str = "intent_model.json";


pub const DEFAULT_VECTORIZER_FILE: &str = "vectorizer.json";


pub const DEFAULT_RESPONSES_FILE: &str = "responses_augmented.csv";
