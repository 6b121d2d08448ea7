// ============================================================
// Layer 2 - TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Check the CSV exists        (fail fast with header)
//   Step 2: Load labelled postings      (Layer 4 - data)
//   Step 3: Fit the standardizer        (Layer 4 - data)
//   Step 4: Save mean / scale           (Layer 6 - infra)
//   Step 5: Standardize + build samples (Layer 4 - data)
//   Step 6: Split train/test            (Layer 4 - data)
//   Step 7: Run training loop           (Layer 5 - ml)
//   Step 8: Save the best model         (Layer 6 - infra)
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::{
    dataset::{PostingDataset, PostingSample},
    loader::CsvPostingLoader,
    splitter::split_train_test,
    standardizer::Standardizer,
};
use crate::domain::posting::{csv_header, FeatureVector};
use crate::domain::traits::PostingSource;
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::MetricsLogger,
    scaler_store::ScalerStore,
};
use crate::ml::trainer::run_training;

/// Below this many rows training still runs, with a warning.
pub const MIN_RECOMMENDED_SAMPLES: usize = 50;

// ─── Training Configuration ──────────────────────────────────────────────────
// All knobs for a training run. The network topology itself lives
// in GhostNetConfig.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:     String,
    pub output_dir:    String,
    pub epochs:        usize,
    pub batch_size:    usize,
    pub lr:            f64,
    pub patience:      usize,
    pub test_fraction: f64,
    pub seed:          u64,
    pub metrics_csv:   Option<String>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:     "training_data.csv".to_string(),
            output_dir:    "trained_model".to_string(),
            epochs:        100,
            batch_size:    32,
            lr:            1e-3,
            patience:      10,
            test_fraction: 0.2,
            seed:          42,
            metrics_csv:   None,
        }
    }
}

/// What a finished run produced, for the CLI to report
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub samples:       usize,
    pub ghost_count:   usize,
    pub train_size:    usize,
    pub test_size:     usize,
    pub best_epoch:    usize,
    pub epochs_run:    usize,
    pub test_accuracy: f64,
    pub output_dir:    PathBuf,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;
        tracing::debug!("Training config: {:?}", cfg);

        // ── Step 1: Fail fast on a missing CSV ────────────────────────────────
        if !Path::new(&cfg.data_path).is_file() {
            bail!(
                "Training data not found: '{}'. Create a CSV with this header:\n{}",
                cfg.data_path,
                csv_header(),
            );
        }

        // ── Step 2: Load labelled postings ────────────────────────────────────
        let loader: Box<dyn PostingSource> = Box::new(CsvPostingLoader::new(&cfg.data_path));
        let records = loader.load_all()?;
        if records.is_empty() {
            bail!("'{}' has a header but no rows", cfg.data_path);
        }

        let ghost_count = records.iter().filter(|r| r.is_ghost()).count();
        println!(
            "Loaded {} samples: {} ghost, {} real",
            records.len(),
            ghost_count,
            records.len() - ghost_count,
        );
        if records.len() < MIN_RECOMMENDED_SAMPLES {
            tracing::warn!(
                "Only {} samples; at least {} are recommended for a useful model",
                records.len(),
                MIN_RECOMMENDED_SAMPLES,
            );
        }

        // ── Step 3 + 4: Fit and persist the standardizer ──────────────────────
        // Fitted on every row, before the split.
        let features: Vec<FeatureVector> = records.iter().map(|r| r.features()).collect();
        let scaler = Standardizer::fit(&features)?;
        ScalerStore::new(&cfg.output_dir).save(&scaler)?;

        // ── Step 5: Standardized samples ──────────────────────────────────────
        let samples: Vec<PostingSample> = scaler
            .transform_all(&features)
            .into_iter()
            .zip(&records)
            .map(|(fv, r)| PostingSample::new(fv, r.label))
            .collect();

        // ── Step 6: Train / test split ────────────────────────────────────────
        let (train_samples, test_samples) = split_train_test(samples, cfg.test_fraction, cfg.seed);
        let (train_size, test_size)       = (train_samples.len(), test_samples.len());
        let train_dataset = PostingDataset::new(train_samples);
        let test_dataset  = PostingDataset::new(test_samples);
        tracing::info!(
            "Split: {} train ({} ghost), {} test ({} ghost)",
            train_size, train_dataset.ghost_count(),
            test_size, test_dataset.ghost_count(),
        );

        // ── Step 7: Run training loop (Layer 5) ───────────────────────────────
        let metrics = cfg.metrics_csv.as_deref().map(MetricsLogger::new).transpose()?;
        if let Some(logger) = &metrics {
            tracing::info!("Appending epoch metrics to '{}'", logger.csv_path().display());
        }
        let outcome = run_training(cfg, train_dataset, test_dataset, metrics.as_ref())?;

        // ── Step 8: Persist the restored best model ───────────────────────────
        let ckpt = CheckpointManager::new(&cfg.output_dir);
        ckpt.save_model(&outcome.model)?;
        tracing::info!("Model saved to '{}'", ckpt.dir().display());

        Ok(TrainReport {
            samples: records.len(),
            ghost_count,
            train_size,
            test_size,
            best_epoch:    outcome.best_epoch,
            epochs_run:    outcome.epochs_run,
            test_accuracy: outcome.test_accuracy,
            output_dir:    ckpt.dir().to_path_buf(),
        })
    }
}
