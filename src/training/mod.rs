
pub mod augment;
pub mod dataset;
pub mod trainer;

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::core::error::Result;
use crate::nlp::normalizer::normalize;
use crate::nlp::vectorizer::{SparseVector, TfidfVectorizer};

pub use augment::{generate_response_variants, generate_variants};
pub use dataset::{AugmentedExample, ResponseRow, TrainingExample};
pub use trainer::{ClassificationReport, TrainerConfig, class_counts, evaluate, fit_ovr, stratified_split};


#[derive(Debug, Clone)]
pub struct TrainingPaths {
    pub train_csv: PathBuf,
    pub responses_csv: PathBuf,
    pub augmented_train_csv: PathBuf,
    pub augmented_responses_csv: PathBuf,
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
}

impl Default for TrainingPaths {
    fn default() -> Self {
        Self {
            train_csv: PathBuf::from("train_data.csv"),
            responses_csv: PathBuf::from("responses.csv"),
            augmented_train_csv: PathBuf::from("train_data_augmented.csv"),
            augmented_responses_csv: PathBuf::from(crate::DEFAULT_RESPONSES_FILE),
            model_path: PathBuf::from(crate::DEFAULT_MODEL_FILE),
            vectorizer_path: PathBuf::from(crate::DEFAULT_VECTORIZER_FILE),
        }
    }
}


#[derive(Debug, Clone)]
pub struct TrainingSummary {
    pub source_examples: usize,
    pub augmented_examples: usize,
    pub features: usize,
    pub classes: Vec<String>,
    pub report: Option<ClassificationReport>,
    pub responses: usize,
}


pub fn run(paths: &TrainingPaths, config: &TrainerConfig) -> Result<TrainingSummary> {
    let examples: Vec<TrainingExample> = dataset::read_csv(&paths.train_csv, "intent,text")?;
    let responses: Vec<ResponseRow> = dataset::read_csv(&paths.responses_csv, "intent,response")?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let augmented: Vec<AugmentedExample> = examples
        .iter()
        .flat_map(|example| {
            generate_variants(&example.text, augment::TRAINING_VARIANTS, &mut rng)
                .into_iter()
                .map(|text| AugmentedExample {
                    clean_text: normalize(&text),
                    text,
                    intent: example.intent.clone(),
                })
                .collect::<Vec<_>>()
        })
        .collect();
    dataset::write_csv(&paths.augmented_train_csv, &augmented)?;
    info!(
        "Saved {} augmented examples to {}",
        augmented.len(),
        paths.augmented_train_csv.display()
    );

    let documents: Vec<&str> = augmented.iter().map(|e| e.clean_text.as_str()).collect();
    let labels: Vec<String> = augmented.iter().map(|e| e.intent.clone()).collect();
    info!("Examples per intent: {:?}", class_counts(&labels));
    let vectorizer = TfidfVectorizer::fit(&documents, config.ngram_range)?;
    let features: Vec<SparseVector> = documents.iter().map(|d| vectorizer.transform(d)).collect();

    let (train_idx, test_idx) = stratified_split(&labels, config.test_size, &mut rng);
    let pick = |idx: &[usize]| -> (Vec<SparseVector>, Vec<String>) {
        idx.iter().map(|&i| (features[i].clone(), labels[i].clone())).unzip()
    };
    let (train_x, train_y) = pick(&train_idx);
    let (test_x, test_y) = pick(&test_idx);

    let model = fit_ovr(&train_x, &train_y, vectorizer.len(), config)?;
    let report = (!test_x.is_empty()).then(|| evaluate(&model, &test_x, &test_y));

    model.save(&paths.model_path)?;
    vectorizer.save(&paths.vectorizer_path)?;
    info!(
        "Saved {} and {}",
        paths.model_path.display(),
        paths.vectorizer_path.display()
    );

    let augmented_responses: Vec<ResponseRow> = responses
        .iter()
        .flat_map(|row| {
            generate_response_variants(&row.response, augment::RESPONSE_VARIANTS, &mut rng)
                .into_iter()
                .map(|response| ResponseRow {
                    intent: row.intent.clone(),
                    response,
                })
                .collect::<Vec<_>>()
        })
        .collect();
    dataset::write_csv(&paths.augmented_responses_csv, &augmented_responses)?;
    info!(
        "Saved {} response variants to {}",
        augmented_responses.len(),
        paths.augmented_responses_csv.display()
    );

    Ok(TrainingSummary {
        source_examples: examples.len(),
        augmented_examples: augmented.len(),
        features: vectorizer.len(),
        classes: model.classes.clone(),
        report,
        responses: augmented_responses.len(),
    })
}
