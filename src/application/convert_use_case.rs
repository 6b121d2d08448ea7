// ============================================================
// Layer 2 - Convert Use Case
// ============================================================
// Re-encodes the trained model for the browser:
//
//   Step 1: Locate the model (model.mpk, else model.json)
//   Step 2: Load it on the inference backend      (Layer 6)
//   Step 3: Write the TF.js layers model          (Layer 6)
//   Step 4: Collect the size of every output file
//
// Nothing is created on disk unless Step 1 succeeds.

use anyhow::{Context, Result};
use burn::backend::ndarray::NdArrayDevice;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf};

use crate::infra::{
    checkpoint::{CheckpointManager, ModelFormat},
    tfjs,
};
use crate::ml::{model::GhostNetConfig, trainer::InferBackend};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    pub model_dir:  String,
    pub output_dir: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            model_dir:  "trained_model".to_string(),
            output_dir: "tfjs_model".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub source:     ModelFormat,
    pub output_dir: PathBuf,
    /// (file name, size in bytes), sorted by name
    pub files:      Vec<(String, u64)>,
}

impl ConvertReport {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|(_, size)| size).sum()
    }
}

impl fmt::Display for ConvertReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Converted {} -> '{}'", self.source, self.output_dir.display())?;
        writeln!(f, "Files:")?;
        for (name, size) in &self.files {
            writeln!(f, "  {} ({} bytes)", name, thousands(*size))?;
        }
        let total = self.total_bytes();
        write!(f, "Total: {} bytes ({:.1} KB)", thousands(total), total as f64 / 1024.0)
    }
}

pub struct ConvertUseCase {
    config: ConvertConfig,
}

impl ConvertUseCase {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<ConvertReport> {
        let cfg    = &self.config;
        let device = NdArrayDevice::default();

        // ── Step 1 + 2: Locate and load ───────────────────────────────────────
        let ckpt            = CheckpointManager::new(&cfg.model_dir);
        let (model, source) = ckpt.load_model::<InferBackend>(&device)?;

        // ── Step 3: Export ────────────────────────────────────────────────────
        let out_dir = PathBuf::from(&cfg.output_dir);
        tfjs::export(&model, &GhostNetConfig::new(), &out_dir)?;

        // ── Step 4: Sizes of everything in the output directory ───────────────
        let mut files = Vec::new();
        for entry in fs::read_dir(&out_dir)
            .with_context(|| format!("Cannot list '{}'", out_dir.display()))?
        {
            let entry = entry?;
            let meta  = entry.metadata()?;
            if meta.is_file() {
                files.push((entry.file_name().to_string_lossy().into_owned(), meta.len()));
            }
        }
        files.sort();

        Ok(ConvertReport { source, output_dir: out_dir, files })
    }
}

/// 1234567 → "1,234,567"
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
