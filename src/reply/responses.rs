use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::core::error::{GiftbotError, Result};


#[derive(Debug, Clone, Default)]
pub struct ResponseTable {
    responses: HashMap<String, String>,
}

impl ResponseTable {
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self { responses }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GiftbotError::model_unavailable(path));
        }

        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();
        let intent_col = headers.iter().position(|h| h.trim() == "intent");
        let response_col = headers.iter().position(|h| h.trim() == "response");

        let (Some(intent_col), Some(response_col)) = (intent_col, response_col) else {
            warn!(
                "{} has no intent/response columns; using built-in replies only",
                path.display()
            );
            return Ok(Self::default());
        };

        let mut responses = HashMap::new();
        for record in reader.records() {
            let record = record?;
            if let (Some(intent), Some(response)) = (record.get(intent_col), record.get(response_col)) {
                responses.insert(intent.to_string(), response.to_string());
            }
        }

        info!("Loaded responses for {} intents from {}", responses.len(), path.display());
        Ok(Self { responses })
    }


    pub fn get(&self, intent: &str) -> Option<&str> {
        self.responses.get(intent).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, intent: &str, default: &'a str) -> &'a str {
        self.get(intent).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl FromIterator<(String, String)> for ResponseTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
