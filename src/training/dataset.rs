use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GiftbotError, Result};


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingExample {
    pub intent: String,
    pub text: String,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRow {
    pub intent: String,
    pub response: String,
}


#[derive(Debug, Clone, Serialize)]
pub struct AugmentedExample {
    pub text: String,
    pub intent: String,
    pub clean_text: String,
}


pub fn read_csv<T: for<'de> Deserialize<'de>>(path: &Path, expected: &str) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(GiftbotError::Validation(format!(
            "please create {} with columns: {expected}",
            path.display()
        )));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<std::result::Result<Vec<T>, _>>()?;
    Ok(rows)
}


pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
