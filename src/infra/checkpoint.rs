// ============================================================
// Layer 6 - Checkpoint Manager
// ============================================================
// Saves and restores GhostNet weights using Burn's file recorders.
//
// The trained model is written twice, in two full-precision
// encodings of the same record:
//
//   trained_model/
//     model.mpk    ← named MessagePack (NamedMpkFileRecorder)
//     model.json   ← pretty JSON       (PrettyJsonFileRecorder)
//
// Loading prefers model.mpk and falls back to model.json, so
// either file alone is enough to test or convert the model.
//
// The architecture is not persisted: GhostNetConfig defaults
// describe the only topology, and loading fails loudly if the
// record does not fit it.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{bail, Context, Result};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, PrettyJsonFileRecorder, Recorder},
};

use crate::ml::model::{GhostNet, GhostNetConfig, GhostNetRecord};

/// File stem shared by both encodings; the recorders add the extension.
const MODEL_STEM: &str = "model";

type MpkRecorder  = NamedMpkFileRecorder<FullPrecisionSettings>;
type JsonRecorder = PrettyJsonFileRecorder<FullPrecisionSettings>;

/// Which encoding a model was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Mpk,
    Json,
}

impl ModelFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ModelFormat::Mpk  => "mpk",
            ModelFormat::Json => "json",
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MODEL_STEM}.{}", self.extension())
    }
}

/// Manages the model files inside one model directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Does not touch the filesystem; directories are only
    /// created when something is saved.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn model_path(&self, format: ModelFormat) -> PathBuf {
        self.dir.join(format.to_string())
    }

    /// First existing encoding, model.mpk before model.json
    pub fn locate_model(&self) -> Option<ModelFormat> {
        [ModelFormat::Mpk, ModelFormat::Json]
            .into_iter()
            .find(|f| self.model_path(*f).is_file())
    }

    /// Write the model in both encodings.
    pub fn save_model<B: Backend>(&self, model: &GhostNet<B>) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let stem = self.dir.join(MODEL_STEM);

        MpkRecorder::new()
            .record(model.clone().into_record(), stem.clone())
            .with_context(|| format!("Failed to save '{}'", self.model_path(ModelFormat::Mpk).display()))?;

        JsonRecorder::new()
            .record(model.clone().into_record(), stem)
            .with_context(|| format!("Failed to save '{}'", self.model_path(ModelFormat::Json).display()))?;

        tracing::debug!("Saved model to '{}'", self.dir.display());
        Ok(())
    }

    /// Load whichever encoding `locate_model` finds.
    pub fn load_model<B: Backend>(&self, device: &B::Device) -> Result<(GhostNet<B>, ModelFormat)> {
        let Some(format) = self.locate_model() else {
            bail!(
                "Model not found in '{}' (expected {} or {}). Run 'train' first.",
                self.dir.display(),
                ModelFormat::Mpk,
                ModelFormat::Json,
            );
        };
        let model = self.load_format(format, device)?;
        Ok((model, format))
    }

    /// Load one specific encoding.
    pub fn load_format<B: Backend>(
        &self,
        format: ModelFormat,
        device: &B::Device,
    ) -> Result<GhostNet<B>> {
        let stem  = self.dir.join(MODEL_STEM);
        let path  = self.model_path(format);
        let model = GhostNetConfig::new().init::<B>(device);

        tracing::info!("Loading model from '{}'", path.display());

        let record: GhostNetRecord<B> = match format {
            ModelFormat::Mpk  => MpkRecorder::new().load(stem, device),
            ModelFormat::Json => JsonRecorder::new().load(stem, device),
        }
        .with_context(|| format!("Cannot load model '{}'", path.display()))?;

        Ok(model.load_record(record))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::TensorData;

    type TestBackend = NdArray;

    fn sample_input(device: &<TestBackend as Backend>::Device) -> Tensor<TestBackend, 2> {
        let values: Vec<f32> = (0..3 * 13).map(|i| ((i * 7) % 11) as f32 / 5.0 - 1.0).collect();
        Tensor::from_data(TensorData::new(values, [3, 13]), device)
    }

    fn probs(model: &GhostNet<TestBackend>, device: &<TestBackend as Backend>::Device) -> Vec<f32> {
        model.predict_proba(sample_input(device)).into_data().to_vec::<f32>().unwrap()
    }

    #[test]
    fn test_missing_model_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path().join("nothing_here"));
        assert_eq!(ckpt.locate_model(), None);

        let err = ckpt.load_model::<TestBackend>(&Default::default()).unwrap_err();
        assert!(err.to_string().contains("Model not found"));
        assert!(!dir.path().join("nothing_here").exists());
    }

    #[test]
    fn test_saves_both_encodings() {
        let dir   = tempfile::tempdir().unwrap();
        let ckpt  = CheckpointManager::new(dir.path());
        let model = GhostNetConfig::new().init::<TestBackend>(&Default::default());

        ckpt.save_model(&model).unwrap();

        assert!(dir.path().join("model.mpk").is_file());
        assert!(dir.path().join("model.json").is_file());
        assert_eq!(ckpt.locate_model(), Some(ModelFormat::Mpk));
    }

    #[test]
    fn test_mpk_and_json_load_identical_networks() {
        let device = Default::default();
        let dir    = tempfile::tempdir().unwrap();
        let ckpt   = CheckpointManager::new(dir.path());
        let model  = GhostNetConfig::new().init::<TestBackend>(&device);
        ckpt.save_model(&model).unwrap();

        let expected = probs(&model, &device);
        let from_mpk  = ckpt.load_format::<TestBackend>(ModelFormat::Mpk, &device).unwrap();
        let from_json = ckpt.load_format::<TestBackend>(ModelFormat::Json, &device).unwrap();

        for (a, b) in expected.iter().zip(probs(&from_mpk, &device)) {
            assert!((a - b).abs() < 1e-6);
        }
        for (a, b) in expected.iter().zip(probs(&from_json, &device)) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_falls_back_to_json() {
        let device = Default::default();
        let dir    = tempfile::tempdir().unwrap();
        let ckpt   = CheckpointManager::new(dir.path());
        ckpt.save_model(&GhostNetConfig::new().init::<TestBackend>(&device)).unwrap();

        fs::remove_file(dir.path().join("model.mpk")).unwrap();

        let (_, format) = ckpt.load_model::<TestBackend>(&device).unwrap();
        assert_eq!(format, ModelFormat::Json);
    }
}
