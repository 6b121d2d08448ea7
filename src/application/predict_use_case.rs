// ============================================================
// Layer 2 - Predict Use Case
// ============================================================
// Scores one raw feature vector:
//   1. Load the trained model (model.mpk, else model.json)
//   2. Load the persisted standardizer parameters
//   3. Standardize with those parameters (never refit)
//   4. Forward pass → probability → verdict

use anyhow::Result;
use std::fmt;
use std::path::Path;

use crate::data::standardizer::Standardizer;
use crate::domain::posting::FeatureVector;
use crate::domain::traits::GhostScorer;
use crate::domain::verdict::Verdict;
use crate::infra::{checkpoint::CheckpointManager, scaler_store::ScalerStore};
use crate::ml::inferencer::Inferencer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub probability: f32,
    pub verdict:     Verdict,
}

impl Prediction {
    pub fn from_probability(probability: f32) -> Self {
        Self { probability, verdict: Verdict::from_probability(probability) }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ghost probability: {:.1}%", self.probability * 100.0)?;
        write!(f, "Verdict: {}", self.verdict)
    }
}

pub struct PredictUseCase {
    scaler:     Standardizer,
    inferencer: Inferencer,
}

impl PredictUseCase {
    pub fn new(model_dir: impl AsRef<Path>) -> Result<Self> {
        let model_dir = model_dir.as_ref();

        // Model first so a missing model is the error the user sees
        let inferencer = Inferencer::from_checkpoint(&CheckpointManager::new(model_dir))?;
        let scaler     = ScalerStore::new(model_dir).load()?;
        Ok(Self { scaler, inferencer })
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        Ok(Prediction::from_probability(self.score(features)?))
    }
}

impl GhostScorer for PredictUseCase {
    fn score(&self, features: &FeatureVector) -> Result<f32> {
        let scaled = self.scaler.transform(features);
        tracing::debug!("Standardized input: {}", scaled);
        self.inferencer.predict(&scaled)
    }
}
