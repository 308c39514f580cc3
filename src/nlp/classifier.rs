
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use tracing::debug;

use super::intent::{IntentLabel, Prediction};
use super::normalizer::normalize;
use super::vectorizer::{SparseVector, TfidfVectorizer};
use crate::core::error::{GiftbotError, Result};


#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MultiClass {
    #[default]
    Ovr,
    Multinomial,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default)]
    pub multi_class: MultiClass,
}

impl LogisticModel {

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GiftbotError::model_unavailable(path));
        }
        let raw = fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&raw)?;
        debug!("Loaded {} model with classes {:?}", <&str>::from(model.multi_class), model.classes);
        Ok(model)
    }


    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }


    pub fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }

    fn is_binary(&self) -> bool {
        self.classes.len() == 2 && self.coef.len() == 1
    }

    pub fn validate(&self, n_features: usize) -> Result<()> {
        if self.classes.len() < 2 {
            return Err(GiftbotError::Artifact(format!(
                "model needs at least two classes, found {}",
                self.classes.len()
            )));
        }
        let expected_rows = if self.is_binary() { 1 } else { self.classes.len() };
        if self.coef.len() != expected_rows || self.intercept.len() != expected_rows {
            return Err(GiftbotError::Artifact(format!(
                "model has {} coefficient rows and {} intercepts for {} classes",
                self.coef.len(),
                self.intercept.len(),
                self.classes.len()
            )));
        }
        if let Some(row) = self.coef.iter().position(|r| r.len() != n_features) {
            return Err(GiftbotError::Artifact(format!(
                "coefficient row {row} has {} weights, vectorizer produces {n_features} features",
                self.coef[row].len()
            )));
        }
        Ok(())
    }


    pub fn decision_function(&self, features: &SparseVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| bias + features.iter().map(|(i, v)| row[*i] * v).sum::<f64>())
            .collect()
    }


    pub fn predict_proba(&self, features: &SparseVector) -> Vec<f64> {
        let scores = self.decision_function(features);

        if self.is_binary() {
            let p = match self.multi_class {
                MultiClass::Ovr => sigmoid(scores[0]),
                MultiClass::Multinomial => sigmoid(2.0 * scores[0]),
            };
            return vec![1.0 - p, p];
        }

        match self.multi_class {
            MultiClass::Ovr => {
                let probs: Vec<f64> = scores.into_iter().map(sigmoid).collect();
                let total: f64 = probs.iter().sum();
                if total > 0.0 {
                    probs.into_iter().map(|p| p / total).collect()
                } else {
                    vec![1.0 / self.classes.len() as f64; self.classes.len()]
                }
            }
            MultiClass::Multinomial => {
                let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
                let total: f64 = exps.iter().sum();
                exps.into_iter().map(|e| e / total).collect()
            }
        }
    }
}


pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}


#[derive(Debug)]
pub struct IntentClassifier {
    vectorizer: TfidfVectorizer,
    model: LogisticModel,
    threshold: f64,
}

impl IntentClassifier {
    pub fn new(vectorizer: TfidfVectorizer, model: LogisticModel, threshold: f64) -> Result<Self> {
        model.validate(vectorizer.len())?;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(GiftbotError::Config(format!(
                "confidence threshold must be within [0, 1], got {threshold}"
            )));
        }
        Ok(Self {
            vectorizer,
            model,
            threshold,
        })
    }

    pub fn load(model_path: &Path, vectorizer_path: &Path, threshold: f64) -> Result<Self> {
        let model = LogisticModel::load(model_path)?;
        let vectorizer = TfidfVectorizer::load(vectorizer_path)?;
        Self::new(vectorizer, model, threshold)
    }


    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn classes(&self) -> &[String] {
        &self.model.classes
    }


    pub fn probabilities(&self, raw_text: &str) -> Vec<(String, f64)> {
        let features = self.vectorizer.transform(&normalize(raw_text));
        self.model
            .classes
            .iter()
            .cloned()
            .zip(self.model.predict_proba(&features))
            .collect()
    }

    pub fn predict(&self, raw_text: &str) -> Prediction {
        let features = self.vectorizer.transform(&normalize(raw_text));
        let probs = self.model.predict_proba(&features);
        let best = argmax(&probs).unwrap_or(0);

        Prediction {
            label: IntentLabel::new(self.model.classes[best].clone()),
            confidence: probs[best],
        }
    }


    pub fn classify(&self, raw_text: &str) -> IntentLabel {
        self.classify_with_confidence(raw_text).0
    }

    pub fn classify_with_confidence(&self, raw_text: &str) -> (IntentLabel, f64) {
        let prediction = self.predict(raw_text);
        debug!(
            "Top class {} with probability {:.3} (threshold {})",
            prediction.label, prediction.confidence, self.threshold
        );

        if prediction.confidence < self.threshold {
            (IntentLabel::unknown(), prediction.confidence)
        } else {
            (prediction.label, prediction.confidence)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::BTreeMap;

    pub(crate) fn shop_vectorizer() -> TfidfVectorizer {
        let vocabulary: BTreeMap<String, usize> = ["chao", "cua", "gia", "hang", "ly", "mua"]
            .iter()
            .enumerate()
            .map(|(i, t)| ((*t).to_string(), i))
            .collect();
        TfidfVectorizer::new(vocabulary, vec![1.0; 6], (1, 1)).unwrap()
    }

    pub(crate) fn shop_model() -> LogisticModel {
        LogisticModel {
            classes: vec!["find_product".into(), "greeting".into(), "store_info".into()],
            coef: vec![
                vec![-4.0, -4.0, 8.0, -4.0, 8.0, 8.0],
                vec![8.0, -4.0, -4.0, -4.0, -4.0, -4.0],
                vec![-4.0, 8.0, -4.0, 8.0, -4.0, -4.0],
            ],
            intercept: vec![-2.0, -2.0, -2.0],
            multi_class: MultiClass::Ovr,
        }
    }

    fn constant_model(probs: &[f64]) -> LogisticModel {
        LogisticModel {
            classes: (0..probs.len()).map(|i| format!("class_{i}")).collect(),
            coef: vec![vec![0.0; 6]; probs.len()],
            intercept: probs.iter().map(|p| p.ln()).collect(),
            multi_class: MultiClass::Multinomial,
        }
    }

    #[test]
    fn test_confident_prediction() {
        let classifier = IntentClassifier::new(shop_vectorizer(), shop_model(), 0.55).unwrap();
        assert_eq!(classifier.classify("Xin chào"), "greeting");
        assert_eq!(classifier.classify("Mua ly"), "find_product");
        assert_eq!(classifier.classify("cửa hàng"), "store_info");
    }

    #[test]
    fn test_low_confidence_is_unknown() {
        let classifier =
            IntentClassifier::new(shop_vectorizer(), constant_model(&[0.4, 0.3, 0.3]), 0.55).unwrap();
        let (label, confidence) = classifier.classify_with_confidence("abc");
        assert!(label.is_unknown());
        assert!((confidence - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_above_threshold_returns_top_class() {
        let classifier =
            IntentClassifier::new(shop_vectorizer(), constant_model(&[0.2, 0.8]), 0.55).unwrap();
        assert_eq!(classifier.classify("abc"), "class_1");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let model = LogisticModel {
            classes: vec!["a".into(), "b".into()],
            coef: vec![vec![0.0; 6]; 2],
            intercept: vec![0.0, 0.0],
            multi_class: MultiClass::Multinomial,
        };
        let at = IntentClassifier::new(shop_vectorizer(), model.clone(), 0.5).unwrap();
        assert_eq!(at.classify("anything"), "a");

        let above = IntentClassifier::new(shop_vectorizer(), model, 0.55).unwrap();
        assert!(above.classify("anything").is_unknown());
    }

    #[test]
    fn test_binary_model_single_row() {
        let model = LogisticModel {
            classes: vec!["greeting".into(), "find_product".into()],
            coef: vec![vec![-6.0, 0.0, 0.0, 0.0, 6.0, 6.0]],
            intercept: vec![0.0],
            multi_class: MultiClass::Ovr,
        };
        let classifier = IntentClassifier::new(shop_vectorizer(), model, 0.55).unwrap();
        assert_eq!(classifier.classify("mua ly"), "find_product");
        assert_eq!(classifier.classify("chào"), "greeting");
    }

    #[test]
    fn test_binary_multinomial_uses_softmax_over_both_classes() {
        let model = LogisticModel {
            classes: vec!["a".into(), "b".into()],
            coef: vec![vec![0.0; 6]],
            intercept: vec![1.0],
            multi_class: MultiClass::Multinomial,
        };
        let probs = model.predict_proba(&Vec::new());
        assert!((probs[1] - 0.880_797).abs() < 1e-6);
        assert!((probs[0] + probs[1] - 1.0).abs() < 1e-12);

        let ovr = LogisticModel { multi_class: MultiClass::Ovr, ..model };
        assert!((ovr.predict_proba(&Vec::new())[1] - 0.731_059).abs() < 1e-6);
    }

    #[test]
    fn test_ovr_probabilities_sum_to_one() {
        let classifier = IntentClassifier::new(shop_vectorizer(), shop_model(), 0.55).unwrap();
        let probs = classifier.probabilities("gia bao nhieu");
        let total: f64 = probs.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(probs.len(), 3);
    }

    #[test]
    fn test_deterministic() {
        let classifier = IntentClassifier::new(shop_vectorizer(), shop_model(), 0.55).unwrap();
        let first = classifier.predict("mua ly ở cửa hàng");
        for _ in 0..5 {
            assert_eq!(classifier.predict("mua ly ở cửa hàng"), first);
        }
    }

    #[test]
    fn test_argmax_first_wins_ties() {
        assert_eq!(argmax(&[0.5, 0.5]), Some(0));
        assert_eq!(argmax(&[0.1, 0.7, 0.7]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_rejects_feature_mismatch() {
        let mut model = shop_model();
        model.coef[1].pop();
        let err = IntentClassifier::new(shop_vectorizer(), model, 0.55).err().unwrap();
        assert!(matches!(err, GiftbotError::Artifact(_)));
    }

    #[test]
    fn test_load_missing_model() {
        let dir = tempfile::tempdir().unwrap();
        let err = IntentClassifier::load(
            &dir.path().join("intent_model.json"),
            &dir.path().join("vectorizer.json"),
            0.55,
        )
        .err()
        .unwrap();
        assert!(matches!(err, GiftbotError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("intent_model.json");
        let vectorizer_path = dir.path().join("vectorizer.json");
        shop_model().save(&model_path).unwrap();
        shop_vectorizer().save(&vectorizer_path).unwrap();

        let classifier = IntentClassifier::load(&model_path, &vectorizer_path, 0.55).unwrap();
        assert_eq!(classifier.classes().len(), 3);
        assert_eq!(classifier.classify("mua ly"), "find_product");
    }
}
