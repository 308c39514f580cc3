

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{GiftbotError, Result};
use crate::resolver::fallback::{DEFAULT_PRODUCT_KEYWORDS, DEFAULT_STORE_KEYWORDS};


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftbotConfig {

    pub host: String,
    pub port: u16,


    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
    pub responses_path: PathBuf,
    pub catalog_path: PathBuf,
    pub static_dir: PathBuf,


    pub confidence_threshold: f64,
    pub max_products: usize,
    pub static_url_prefix: String,

    pub fallback: FallbackConfig,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub product_keywords: Vec<String>,
    pub store_keywords: Vec<String>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            product_keywords: DEFAULT_PRODUCT_KEYWORDS.iter().map(|s| (*s).to_string()).collect(),
            store_keywords: DEFAULT_STORE_KEYWORDS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl GiftbotConfig {

    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            model_path: PathBuf::from(crate::DEFAULT_MODEL_FILE),
            vectorizer_path: PathBuf::from(crate::DEFAULT_VECTORIZER_FILE),
            responses_path: PathBuf::from(crate::DEFAULT_RESPONSES_FILE),
            catalog_path: PathBuf::from("catalog.db"),
            static_dir: PathBuf::from("static"),
            confidence_threshold: crate::DEFAULT_CONFIDENCE_THRESHOLD,
            max_products: crate::DEFAULT_MAX_PRODUCTS,
            static_url_prefix: "/static".to_string(),
            fallback: FallbackConfig::default(),
        }
    }


    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_layered(file, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("GIFTBOT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("fallback.product_keywords")
            .with_list_parse_key("fallback.store_keywords")
    }

    fn load_layered(file: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        } else {
            builder = builder.add_source(config::File::with_name("giftbot").required(false));
        }

        let settings = builder.add_source(environment).build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(GiftbotError::Config(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if self.max_products == 0 {
            return Err(GiftbotError::Config("max_products must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for GiftbotConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", crate::DEFAULT_PORT)
    }
}
