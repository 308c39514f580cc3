

use thiserror::Error;


#[derive(Error, Debug)]
pub enum GiftbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model unavailable: {path} (run giftbot-train first)")]
    ModelUnavailable { path: String },

    #[error("Invalid model artifact: {0}")]
    Artifact(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),
}

impl GiftbotError {
    pub fn model_unavailable(path: impl AsRef<std::path::Path>) -> Self {
        Self::ModelUnavailable {
            path: path.as_ref().display().to_string(),
        }
    }
}


pub type Result<T> = std::result::Result<T, GiftbotError>;
