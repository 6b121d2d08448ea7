use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::posting::{FeatureVector, NUM_FEATURES};

/// One standardised posting with its label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingSample {
    pub features: [f32; NUM_FEATURES],
    pub label:    u8,
}

impl PostingSample {
    pub fn new(features: FeatureVector, label: u8) -> Self {
        Self { features: features.0, label }
    }
}

pub struct PostingDataset {
    samples: Vec<PostingSample>,
}

impl PostingDataset {
    pub fn new(samples: Vec<PostingSample>) -> Self { Self { samples } }

    pub fn ghost_count(&self) -> usize {
        self.samples.iter().filter(|s| s.label == 1).count()
    }
}

impl Dataset<PostingSample> for PostingDataset {
    fn get(&self, index: usize) -> Option<PostingSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
