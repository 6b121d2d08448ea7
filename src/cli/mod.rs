// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application);
// this layer only routes and prints the returned reports.
//
// Four commands are supported:
//   1. `train`   - trains the classifier on a labelled CSV
//   2. `test`    - scores one feature vector
//   3. `convert` - writes the TensorFlow.js model
//   4. `extract` - derives the features from posting text
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, ConvertArgs, ExtractArgs, TestArgs, TrainArgs};

use crate::domain::posting::{FeatureVector, NUM_FEATURES};

/// The main CLI struct - clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "ghost-job-detector",
    version,
    about = "Train, test and export a classifier that flags ghost job postings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Test(args)    => run_test(args),
            Commands::Convert(args) => run_convert(args),
            Commands::Extract(args) => run_extract(args),
        }
    }
}

/// Handles the `train` subcommand.
/// Converts CLI args into a TrainConfig and hands off to Layer 2.
fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on '{}'", args.data);

    let report = TrainUseCase::new(args.into()).execute()?;

    println!();
    println!(
        "Trained on {} samples ({} ghost): {} train / {} test",
        report.samples, report.ghost_count, report.train_size, report.test_size,
    );
    println!(
        "Best epoch: {} of {} run",
        report.best_epoch, report.epochs_run,
    );
    println!("Test accuracy: {:.1}%", report.test_accuracy * 100.0);
    println!("Saved model and standardizer to '{}'", report.output_dir.display());
    Ok(())
}

/// Handles the `test` subcommand.
/// Too few values is not an error: print usage and stop.
fn run_test(args: TestArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let Some(features) = FeatureVector::from_slice(&args.values) else {
        println!("{}", commands::test_usage());
        return Ok(());
    };
    if args.values.len() > NUM_FEATURES {
        tracing::warn!(
            "Ignoring {} extra value(s) after the first {}",
            args.values.len() - NUM_FEATURES,
            NUM_FEATURES,
        );
    }

    let predictor  = PredictUseCase::new(&args.model_dir)?;
    let prediction = predictor.predict(&features)?;
    println!("{prediction}");
    Ok(())
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    use crate::application::convert_use_case::ConvertUseCase;

    let report = ConvertUseCase::new(args.into()).execute()?;
    println!("{report}");
    Ok(())
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    use crate::application::{extract_use_case::ExtractUseCase, predict_use_case::PredictUseCase};

    let use_case = ExtractUseCase::new()?;
    let signals  = use_case.extract_from(&args.input)?;
    let features = signals.features();

    for (name, value) in features.named() {
        tracing::debug!("{name:>18} = {value}");
    }
    println!("{features}");

    if args.heuristic {
        println!("{}", use_case.heuristic(&signals, args.threshold));
    }
    if args.predict {
        let predictor  = PredictUseCase::new(&args.model_dir)?;
        let prediction = use_case.score(&predictor, &features)?;
        println!("{prediction}");
    }
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::standardizer::Standardizer;
    use crate::infra::{checkpoint::CheckpointManager, scaler_store::ScalerStore};
    use crate::ml::{model::GhostNetConfig, trainer::InferBackend};
    use std::path::Path;

    const POSTING: &str = "Junior analyst. Reposted 3 months ago. 900 applicants. \
        Competitive pay, fast-paced team.";

    fn write_posting(dir: &Path) -> String {
        let path = dir.join("posting.txt");
        std::fs::write(&path, POSTING).unwrap();
        path.to_string_lossy().into_owned()
    }

    /// Untrained network plus an identity standardizer
    fn save_untrained_model(dir: &Path) {
        let model = GhostNetConfig::new().init::<InferBackend>(&Default::default());
        CheckpointManager::new(dir).save_model(&model).unwrap();
        let scaler = Standardizer::from_params(vec![0.0; NUM_FEATURES], vec![1.0; NUM_FEATURES]).unwrap();
        ScalerStore::new(dir).save(&scaler).unwrap();
    }

    #[test]
    fn test_twelve_values_print_usage_without_loading_a_model() {
        let dir = tempfile::tempdir().unwrap();
        let model_dir = dir.path().join("no_model");
        let mut argv = vec!["ghost-job-detector".to_string(), "test".to_string()];
        argv.extend((0..12).map(|i| i.to_string()));
        argv.extend(["--model-dir".to_string(), model_dir.to_string_lossy().into_owned()]);

        let cli = Cli::try_parse_from(argv).unwrap();
        assert!(cli.run().is_ok());
    }

    #[test]
    fn test_thirteen_values_without_model_fail() {
        let dir = tempfile::tempdir().unwrap();
        let model_dir = dir.path().join("no_model");
        let mut argv = vec!["ghost-job-detector".to_string(), "test".to_string()];
        argv.extend((0..13).map(|i| i.to_string()));
        argv.extend(["--model-dir".to_string(), model_dir.to_string_lossy().into_owned()]);

        let err = Cli::try_parse_from(argv).unwrap().run().unwrap_err();
        assert!(err.to_string().contains("Model not found"));
    }

    #[test]
    fn test_negative_values_parse() {
        let cli = Cli::try_parse_from([
            "ghost-job-detector", "test",
            "-1", "-1", "0", "0", "120", "0", "0", "0", "0", "0", "0", "0", "0",
        ])
        .unwrap();
        let Commands::Test(args) = cli.command else { panic!("expected test") };
        assert_eq!(args.values.len(), 13);
        assert_eq!(args.values[0], -1.0);
        assert_eq!(args.model_dir, "trained_model");
    }

    #[test]
    fn test_train_defaults() {
        let cli = Cli::try_parse_from(["ghost-job-detector", "train"]).unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg: crate::application::train_use_case::TrainConfig = args.into();
        assert_eq!(cfg.data_path, "training_data.csv");
        assert_eq!(cfg.output_dir, "trained_model");
        assert_eq!(cfg.epochs, 100);
        assert!(cfg.metrics_csv.is_none());
    }

    #[test]
    fn test_extract_with_predict_scores_with_saved_model() {
        let dir       = tempfile::tempdir().unwrap();
        let model_dir = dir.path().join("trained_model");
        save_untrained_model(&model_dir);
        let posting = write_posting(dir.path());

        let cli = Cli::try_parse_from([
            "ghost-job-detector", "extract", posting.as_str(), "--predict",
            "--model-dir", model_dir.to_str().unwrap(),
        ])
        .unwrap();
        assert!(cli.run().is_ok());
    }

    #[test]
    fn test_extract_with_predict_needs_a_model() {
        let dir     = tempfile::tempdir().unwrap();
        let posting = write_posting(dir.path());
        let missing = dir.path().join("no_model");

        let err = Cli::try_parse_from([
            "ghost-job-detector", "extract", posting.as_str(), "--predict",
            "--model-dir", missing.to_str().unwrap(),
        ])
        .unwrap()
        .run()
        .unwrap_err();
        assert!(err.to_string().contains("Model not found"));
    }

    #[test]
    fn test_extract_heuristic_runs_without_model() {
        let dir     = tempfile::tempdir().unwrap();
        let posting = write_posting(dir.path());

        let cli = Cli::try_parse_from([
            "ghost-job-detector", "extract", posting.as_str(), "--heuristic", "--threshold", "40",
            "--model-dir", dir.path().join("no_model").to_str().unwrap(),
        ])
        .unwrap();
        let Commands::Extract(args) = &cli.command else { panic!("expected extract") };
        assert!(args.heuristic && !args.predict);
        assert_eq!(args.threshold, 40);
        assert!(cli.run().is_ok());
    }
}
