

use std::path::PathBuf;

use clap::Parser;
use giftbot::training::{self, TrainerConfig, TrainingPaths};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};


#[derive(Debug, Parser)]
#[command(name = "giftbot-train", about = "Train the intent model and augment canned responses")]
struct Args {
    #[arg(long, default_value = "train_data.csv")]
    train: PathBuf,

    #[arg(long, default_value = "responses.csv")]
    responses: PathBuf,

    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value_t = 1.0)]
    c: f64,

    #[arg(long, default_value_t = 2000)]
    max_iter: usize,

    #[arg(long, default_value_t = 0.2)]
    test_size: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("giftbot=info".parse()?))
        .init();

    let args = Args::parse();
    let defaults = TrainingPaths::default();
    let paths = TrainingPaths {
        train_csv: args.train,
        responses_csv: args.responses,
        augmented_train_csv: args.out_dir.join(&defaults.augmented_train_csv),
        augmented_responses_csv: args.out_dir.join(&defaults.augmented_responses_csv),
        model_path: args.out_dir.join(&defaults.model_path),
        vectorizer_path: args.out_dir.join(&defaults.vectorizer_path),
    };
    let config = TrainerConfig {
        c: args.c,
        max_iter: args.max_iter,
        test_size: args.test_size,
        seed: args.seed,
        ..Default::default()
    };

    let summary = training::run(&paths, &config)?;

    println!(
        "Trained on {} examples ({} after augmentation), {} features, intents: {}",
        summary.source_examples,
        summary.augmented_examples,
        summary.features,
        summary.classes.join(", ")
    );
    match &summary.report {
        Some(report) => println!("=== Classification report ===\n{report}"),
        None => println!("Not enough data for a held-out report"),
    }
    println!("Saved {} response variants", summary.responses);

    Ok(())
}
