// ============================================================
// Layer 6 - Metrics Logger
// ============================================================
// Appends one row per training epoch to a CSV file.
//
// Metrics recorded per epoch:
//   - epoch:      the epoch number (1, 2, 3, ...)
//   - train_loss: mean binary cross-entropy over training batches
//   - train_acc:  training accuracy at the 0.5 threshold
//   - val_loss:   mean binary cross-entropy on the held-out set
//   - val_acc:    held-out accuracy (the early-stopping monitor)
//
// Example CSV output:
//   epoch,train_loss,train_acc,val_loss,val_acc
//   1,0.6931,0.5125,0.6812,0.55
//   2,0.6124,0.6875,0.5983,0.7
//
// The logger is optional; the trainer only creates one when a
// path is given, so the model directory holds model artifacts only.

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

const HEADER: [&str; 5] = ["epoch", "train_loss", "train_acc", "val_loss", "val_acc"];

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch:      usize,
    pub train_loss: f64,
    pub train_acc:  f64,
    pub val_loss:   f64,
    pub val_acc:    f64,
}

impl EpochMetrics {
    pub fn new(
        epoch:      usize,
        train_loss: f64,
        train_acc:  f64,
        val_loss:   f64,
        val_acc:    f64,
    ) -> Self {
        Self { epoch, train_loss, train_acc, val_loss, val_acc }
    }

    /// Keras-style progress line
    pub fn progress_line(&self, total_epochs: usize) -> String {
        format!(
            "Epoch {:>3}/{} | loss={:.4} | accuracy={:.4} | val_loss={:.4} | val_accuracy={:.4}",
            self.epoch, total_epochs, self.train_loss, self.train_acc, self.val_loss, self.val_acc,
        )
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a logger writing to `csv_path`.
    /// Writes the header only if the file doesn't exist yet, so
    /// several runs can append to the same log.
    pub fn new(csv_path: impl AsRef<Path>) -> Result<Self> {
        let csv_path = csv_path.as_ref().to_path_buf();

        if let Some(parent) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        if !csv_path.exists() {
            let mut writer = csv::Writer::from_path(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writer.write_record(HEADER)?;
            writer.flush()?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        // Header is already in the file; the row order follows the struct fields
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer
            .serialize(m)
            .with_context(|| format!("Cannot write epoch {} to '{}'", m.epoch, self.csv_path.display()))?;
        writer.flush()?;
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
