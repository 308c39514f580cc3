
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::error::{GiftbotError, Result};

lazy_static! {
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\b\w\w+\b").expect("valid token pattern");
}


pub type SparseVector = Vec<(usize, f64)>;


#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default)]
    norm: Norm,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 2)
}

impl TfidfVectorizer {
    pub fn new(
        vocabulary: BTreeMap<String, usize>,
        idf: Vec<f64>,
        ngram_range: (usize, usize),
    ) -> Result<Self> {
        let vectorizer = Self {
            vocabulary,
            idf,
            ngram_range,
            sublinear_tf: false,
            norm: Norm::L2,
        };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    pub fn fit<S: AsRef<str>>(documents: &[S], ngram_range: (usize, usize)) -> Result<Self> {
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms: BTreeSet<String> = analyze(doc.as_ref(), ngram_range).into_iter().collect();
            for term in terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(GiftbotError::Validation(
                "empty vocabulary; documents contain no tokens".to_string(),
            ));
        }

        let mut terms: Vec<(String, usize)> = document_frequency.into_iter().collect();
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let n_docs = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(terms.len());
        for (index, (term, df)) in terms.into_iter().enumerate() {
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        info!("Fitted vectorizer: {} documents, {} features", documents.len(), idf.len());
        Self::new(vocabulary, idf, ngram_range)
    }


    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GiftbotError::model_unavailable(path));
        }
        let raw = fs::read_to_string(path)?;
        let vectorizer: Self = serde_json::from_str(&raw)?;
        vectorizer.validate()?;
        debug!("Loaded vectorizer with {} features from {}", vectorizer.len(), path.display());
        Ok(vectorizer)
    }


    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(GiftbotError::Artifact(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err(GiftbotError::Artifact(format!(
                "vectorizer has {} idf weights for {} terms",
                self.idf.len(),
                self.vocabulary.len()
            )));
        }
        if let Some((term, index)) = self.vocabulary.iter().find(|(_, i)| **i >= self.idf.len()) {
            return Err(GiftbotError::Artifact(format!(
                "term {term:?} maps to out-of-range feature {index}"
            )));
        }
        Ok(())
    }


    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in analyze(text, self.ngram_range) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut features: SparseVector = counts
            .into_iter()
            .map(|(index, count)| {
                let tf = if self.sublinear_tf { 1.0 + count.ln() } else { count };
                (index, tf * self.idf[index])
            })
            .collect();

        if self.norm == Norm::L2 {
            let norm = features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, value) in &mut features {
                    *value /= norm;
                }
            }
        }

        features
    }
}


pub fn analyze(text: &str, ngram_range: (usize, usize)) -> Vec<String> {
    let words: Vec<&str> = TOKEN_PATTERN.find_iter(text).map(|m| m.as_str()).collect();
    let (min_n, max_n) = ngram_range;
    let mut terms = Vec::new();

    for n in min_n..=max_n {
        if n == 0 || n > words.len() {
            continue;
        }
        for window in words.windows(n) {
            terms.push(window.join(" "));
        }
    }

    terms
}
