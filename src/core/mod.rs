

pub mod config;
pub mod error;

pub use self::config::{FallbackConfig, GiftbotConfig};
pub use self::error::{GiftbotError, Result};
