// ============================================================
// Layer 5 - Inferencer
// ============================================================
use anyhow::{anyhow, Result};
use burn::{backend::ndarray::NdArrayDevice, prelude::*, tensor::TensorData};

use crate::domain::posting::{FeatureVector, NUM_FEATURES};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::GhostNet;
use crate::ml::trainer::InferBackend;

pub struct Inferencer {
    model:  GhostNet<InferBackend>,
    device: NdArrayDevice,
}

impl Inferencer {
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let device          = NdArrayDevice::default();
        let (model, source) = ckpt_manager.load_model::<InferBackend>(&device)?;
        tracing::info!("Model loaded from {}", source);
        Ok(Self { model, device })
    }

    #[cfg(test)]
    pub fn from_model(model: GhostNet<InferBackend>) -> Self {
        Self { model, device: NdArrayDevice::default() }
    }

    /// Ghost probability of one already-standardized vector
    pub fn predict(&self, standardized: &FeatureVector) -> Result<f32> {
        let input = Tensor::<InferBackend, 2>::from_data(
            TensorData::new(standardized.0.to_vec(), [1, NUM_FEATURES]),
            &self.device,
        );

        let probs = self.model
            .predict_proba(input)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow!("Cannot read model output: {e:?}"))?;

        let p = probs.first().copied().ok_or_else(|| anyhow!("Model returned no output"))?;
        tracing::debug!("Forward pass: p={:.4}", p);
        Ok(p)
    }
}
