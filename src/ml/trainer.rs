// ============================================================
// Layer 5 - Training Loop
// ============================================================
// Train + validation loop using Burn's DataLoader and Adam.
//
//   - Training uses TrainBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on InferBackend (NdArray)
//     with dropout off and batch norm on its running statistics
//   - Validation batcher must also use InferBackend
//   - The held-out split doubles as the validation set, and its
//     accuracy drives early stopping
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    backend::{ndarray::NdArrayDevice, Autodiff, NdArray},
    data::dataloader::{DataLoader, DataLoaderBuilder},
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{
    batcher::{PostingBatch, PostingBatcher},
    dataset::PostingDataset,
};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::early_stopping::{EarlyStopping, StopDecision};
use crate::ml::model::{count_correct, GhostNet, GhostNetConfig};

pub type InferBackend = NdArray;
type TrainBackend     = Autodiff<InferBackend>;

/// Result of a finished training run
pub struct TrainOutcome {
    /// Weights from the best validation epoch
    pub model:         GhostNet<InferBackend>,
    pub best_epoch:    usize,
    pub epochs_run:    usize,
    pub test_accuracy: f64,
}

/// Mean loss and accuracy over one pass of a data loader
#[derive(Debug, Clone, Copy)]
struct Evaluation {
    loss:     f64,
    accuracy: f64,
}

pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: PostingDataset,
    test_dataset:  PostingDataset,
    metrics:       Option<&MetricsLogger>,
) -> Result<TrainOutcome> {
    let device = NdArrayDevice::default();
    tracing::info!("Using NdArray device: {:?}", device);
    TrainBackend::seed(cfg.seed);
    train_loop(cfg, train_dataset, test_dataset, metrics, device)
}

fn train_loop(
    cfg:           &TrainConfig,
    train_dataset: PostingDataset,
    test_dataset:  PostingDataset,
    metrics:       Option<&MetricsLogger>,
    device:        NdArrayDevice,
) -> Result<TrainOutcome> {

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: GhostNet<TrainBackend> = GhostNetConfig::new().init(&device);
    println!(
        "Model: {} parameters ({} trainable)",
        model.total_params(),
        model.trainable_params(),
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-7);
    let mut optim = optim_cfg.init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = PostingBatcher::<TrainBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (InferBackend, no autodiff overhead) ──────────
    let test_batcher = PostingBatcher::<InferBackend>::new(device);
    let test_loader  = DataLoaderBuilder::new(test_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(test_dataset);

    let mut stopper    = EarlyStopping::new(cfg.patience);
    let mut best_model = None;
    let mut epochs_run = 0;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        epochs_run = epoch;

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;
        let mut train_correct  = 0usize;
        let mut train_samples  = 0usize;

        for batch in train_loader.iter() {
            train_samples += batch.labels.dims()[0];

            let (loss, logits) = model.forward_loss(batch.features, batch.labels.clone());

            train_loss_sum += loss.clone().into_scalar().elem::<f64>();
            train_batches  += 1;
            train_correct  += count_correct(logits, batch.labels);

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = if train_batches > 0 { train_loss_sum / train_batches as f64 } else { f64::NAN };
        let train_acc  = if train_samples > 0 { train_correct as f64 / train_samples as f64 } else { 0.0 };

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();
        let val         = evaluate(&model_valid, test_loader.as_ref());

        let row = EpochMetrics::new(epoch, train_loss, train_acc, val.loss, val.accuracy);
        println!("{}", row.progress_line(cfg.epochs));
        if let Some(logger) = metrics {
            logger.log(&row)?;
        }

        match stopper.update(epoch, val.accuracy) {
            StopDecision::Improved => best_model = Some(model_valid),
            StopDecision::Continue => {}
            StopDecision::Stop => {
                println!(
                    "Early stopping at epoch {epoch}: no val_accuracy improvement for {} epochs",
                    cfg.patience,
                );
                break;
            }
        }
    }

    // ── Restore best weights ──────────────────────────────────────────────────
    let best_epoch = stopper.best_epoch().unwrap_or(epochs_run);
    let model = match best_model {
        Some(best) => {
            tracing::info!(
                "Restoring weights from epoch {} (val_accuracy={:.4})",
                best_epoch, stopper.best(),
            );
            best
        }
        None => model.valid(),
    };

    let test = evaluate(&model, test_loader.as_ref());
    tracing::info!("Training complete after {} epochs", epochs_run);

    Ok(TrainOutcome { model, best_epoch, epochs_run, test_accuracy: test.accuracy })
}

fn evaluate(
    model:  &GhostNet<InferBackend>,
    loader: &dyn DataLoader<PostingBatch<InferBackend>>,
) -> Evaluation {
    let mut loss_sum = 0.0f64;
    let mut batches  = 0usize;
    let mut correct  = 0usize;
    let mut samples  = 0usize;

    for batch in loader.iter() {
        samples += batch.labels.dims()[0];

        let (loss, logits) = model.forward_loss(batch.features, batch.labels.clone());
        loss_sum += loss.into_scalar().elem::<f64>();
        batches  += 1;
        correct  += count_correct(logits, batch.labels);
    }

    Evaluation {
        loss:     if batches > 0 { loss_sum / batches as f64 } else { f64::NAN },
        accuracy: if samples > 0 { correct as f64 / samples as f64 } else { 0.0 },
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::PostingSample;
    use crate::domain::posting::FeatureVector;

    /// Linearly separable on the first feature
    fn separable(n: usize) -> PostingDataset {
        let samples = (0..n)
            .map(|i| {
                let ghost = i % 2 == 0;
                let mut f = [0.0f32; 13];
                f[0] = if ghost { 1.5 } else { -1.5 };
                f[1] = (i % 5) as f32 / 5.0 - 0.4;
                PostingSample::new(FeatureVector(f), u8::from(ghost))
            })
            .collect();
        PostingDataset::new(samples)
    }

    fn quick_config(epochs: usize, patience: usize) -> TrainConfig {
        TrainConfig { epochs, patience, batch_size: 16, ..TrainConfig::default() }
    }

    #[test]
    fn test_learns_separable_data() {
        let cfg     = quick_config(30, 30);
        let outcome = run_training(&cfg, separable(128), separable(16), None).unwrap();
        assert!(outcome.test_accuracy >= 0.9, "accuracy {}", outcome.test_accuracy);
        assert!(outcome.best_epoch >= 1 && outcome.best_epoch <= outcome.epochs_run);
    }

    #[test]
    fn test_early_stopping_cuts_run_short() {
        // Perfect accuracy is reached quickly and can never be
        // beaten, so the run ends `patience` epochs after that.
        let cfg     = quick_config(100, 3);
        let outcome = run_training(&cfg, separable(64), separable(16), None).unwrap();
        assert!(outcome.epochs_run < 100);
        assert_eq!(outcome.epochs_run, outcome.best_epoch + 3);
    }

    #[test]
    fn test_writes_metrics_rows() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path().join("metrics.csv")).unwrap();
        let cfg    = quick_config(2, 10);
        run_training(&cfg, separable(32), separable(8), Some(&logger)).unwrap();

        let body = std::fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(body.lines().count(), 3);
    }
}
