
use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::core::error::{GiftbotError, Result};
use crate::nlp::classifier::{LogisticModel, MultiClass, argmax, sigmoid};
use crate::nlp::vectorizer::SparseVector;


#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub c: f64,
    pub max_iter: usize,
    pub learning_rate: f64,
    pub tolerance: f64,
    pub ngram_range: (usize, usize),
    pub test_size: f64,
    pub seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 2000,
            learning_rate: 1.0,
            tolerance: 1e-5,
            ngram_range: (1, 2),
            test_size: 0.2,
            seed: 42,
        }
    }
}


pub fn fit_ovr(
    features: &[SparseVector],
    labels: &[String],
    n_features: usize,
    config: &TrainerConfig,
) -> Result<LogisticModel> {
    if features.is_empty() || features.len() != labels.len() {
        return Err(GiftbotError::Validation(format!(
            "need matching features and labels, got {} and {}",
            features.len(),
            labels.len()
        )));
    }

    let classes: Vec<String> = labels
        .iter()
        .cloned()
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    if classes.len() < 2 {
        return Err(GiftbotError::Validation(format!(
            "need at least two intents to train, found {}",
            classes.len()
        )));
    }

    let mut coef = Vec::with_capacity(classes.len());
    let mut intercept = Vec::with_capacity(classes.len());
    for class in &classes {
        let targets: Vec<f64> = labels.iter().map(|l| if l == class { 1.0 } else { 0.0 }).collect();
        let (weights, bias, iterations) = fit_binary(features, &targets, n_features, config);
        debug!("Class {} converged after {} iterations", class, iterations);
        coef.push(weights);
        intercept.push(bias);
    }

    Ok(LogisticModel {
        classes,
        coef,
        intercept,
        multi_class: MultiClass::Ovr,
    })
}

fn fit_binary(
    features: &[SparseVector],
    targets: &[f64],
    n_features: usize,
    config: &TrainerConfig,
) -> (Vec<f64>, f64, usize) {
    let n = features.len() as f64;
    let lambda = 1.0 / (config.c * n);
    let mut weights = vec![0.0; n_features];
    let mut bias = 0.0;
    let mut grad = vec![0.0; n_features];

    for iteration in 0..config.max_iter {
        grad.iter_mut().for_each(|g| *g = 0.0);
        let mut grad_bias = 0.0;

        for (x, y) in features.iter().zip(targets) {
            let z = bias + x.iter().map(|(i, v)| weights[*i] * v).sum::<f64>();
            let err = sigmoid(z) - y;
            grad_bias += err;
            for (i, v) in x {
                grad[*i] += err * v;
            }
        }

        let mut max_grad = (grad_bias / n).abs();
        for (g, w) in grad.iter_mut().zip(&weights) {
            *g = *g / n + lambda * w;
            max_grad = max_grad.max(g.abs());
        }
        if max_grad < config.tolerance {
            return (weights, bias, iteration);
        }

        bias -= config.learning_rate * grad_bias / n;
        for (w, g) in weights.iter_mut().zip(&grad) {
            *w -= config.learning_rate * g;
        }
    }

    (weights, bias, config.max_iter)
}

pub fn stratified_split<R: Rng + ?Sized>(
    labels: &[String],
    test_size: f64,
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let mut by_class: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, label) in labels.iter().enumerate() {
        by_class.entry(label.as_str()).or_default().push(index);
    }

    let mut train = Vec::new();
    let mut test = Vec::new();
    for (_, mut indices) in by_class {
        indices.shuffle(rng);
        let n_test = ((indices.len() as f64) * test_size).round() as usize;
        let n_test = n_test.min(indices.len().saturating_sub(1));
        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    (train, test)
}


#[derive(Debug, Clone)]
pub struct ClassScore {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}


#[derive(Debug, Clone)]
pub struct ClassificationReport {
    pub classes: Vec<ClassScore>,
    pub accuracy: f64,
    pub total: usize,
}

impl ClassificationReport {
    pub fn new(truth: &[String], predicted: &[String]) -> Self {
        let mut counts: BTreeMap<&str, (usize, usize, usize)> = BTreeMap::new();
        let mut correct = 0;

        for (t, p) in truth.iter().zip(predicted) {
            if t == p {
                correct += 1;
                counts.entry(t.as_str()).or_default().0 += 1;
            } else {
                counts.entry(p.as_str()).or_default().1 += 1;
                counts.entry(t.as_str()).or_default().2 += 1;
            }
        }

        let classes = counts
            .into_iter()
            .map(|(label, (tp, fp, fn_))| {
                let precision = ratio(tp, tp + fp);
                let recall = ratio(tp, tp + fn_);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassScore {
                    label: label.to_string(),
                    precision,
                    recall,
                    f1,
                    support: tp + fn_,
                }
            })
            .collect();

        Self {
            classes,
            accuracy: ratio(correct, truth.len()),
            total: truth.len(),
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>20} {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1-score", "support")?;
        for score in &self.classes {
            writeln!(
                f,
                "{:>20} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                score.label, score.precision, score.recall, score.f1, score.support
            )?;
        }
        write!(f, "{:>20} {:>29.2} {:>9}", "accuracy", self.accuracy, self.total)
    }
}


pub fn evaluate(model: &LogisticModel, features: &[SparseVector], labels: &[String]) -> ClassificationReport {
    let predicted: Vec<String> = features
        .iter()
        .map(|x| {
            let best = argmax(&model.predict_proba(x)).unwrap_or(0);
            model.classes[best].clone()
        })
        .collect();

    let report = ClassificationReport::new(labels, &predicted);
    info!("Held-out accuracy {:.3} on {} examples", report.accuracy, report.total);
    report
}


pub fn class_counts(labels: &[String]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.as_str()).or_insert(0) += 1;
    }
    counts
}
