// ============================================================
// Layer 4 - Posting Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<PostingSample>
// into tensors:
//
//   Input:  N samples, each with 13 standardised features
//   Output: features [N, 13] (float), labels [N] (int)
//
// Features are flattened row-major into one Vec<f32> and then
// shaped as [N, 13].
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::data::dataset::PostingSample;
use crate::domain::posting::NUM_FEATURES;

// ─── PostingBatch ─────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct PostingBatch<B: Backend> {
    /// Standardised features - shape: [batch_size, NUM_FEATURES]
    pub features: Tensor<B, 2>,

    /// Ground truth - shape: [batch_size], 1 = ghost, 0 = real
    pub labels: Tensor<B, 1, Int>,
}

// ─── PostingBatcher ───────────────────────────────────────────────────────────
/// Holds the target device so tensors are created on it.
#[derive(Clone, Debug)]
pub struct PostingBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> PostingBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<PostingSample, PostingBatch<B>> for PostingBatcher<B> {
    fn batch(&self, items: Vec<PostingSample>) -> PostingBatch<B> {
        let batch_size = items.len();

        let features_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();

        let labels: Vec<i32> = items
            .iter()
            .map(|s| s.label as i32)
            .collect();

        let features = Tensor::<B, 2>::from_data(
            TensorData::new(features_flat, [batch_size, NUM_FEATURES]),
            &self.device,
        );

        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        PostingBatch { features, labels }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes_and_values() {
        let device  = Default::default();
        let batcher = PostingBatcher::<NdArray>::new(device);

        let mut first = [0.0f32; NUM_FEATURES];
        first[0] = 1.5;
        let mut second = [0.0f32; NUM_FEATURES];
        second[NUM_FEATURES - 1] = -2.0;

        let batch = batcher.batch(vec![
            PostingSample { features: first,  label: 1 },
            PostingSample { features: second, label: 0 },
        ]);

        assert_eq!(batch.features.dims(), [2, NUM_FEATURES]);
        assert_eq!(batch.labels.dims(),   [2]);

        let values = batch.features.into_data().to_vec::<f32>().unwrap();
        assert_eq!(values[0], 1.5);
        assert_eq!(values[2 * NUM_FEATURES - 1], -2.0);

        let labels = batch.labels.into_data().to_vec::<i64>().unwrap();
        assert_eq!(labels, vec![1, 0]);
    }
}
