// ============================================================
// Layer 4 - Standardizer
// ============================================================
// Per-feature z-score scaling:  x' = (x - mean) / scale
//
// `fit` computes the mean and the population standard deviation
// (divide by n) of every column. A constant column has a
// deviation of zero; its scale is stored as 1.0 so transform
// leaves it centred rather than dividing by zero.
//
// Parameters are computed once at training time and persisted
// (see infra::scaler_store). Inference loads them and calls
// `transform` only; it never refits.

use anyhow::{bail, Result};

use crate::domain::posting::{FeatureVector, NUM_FEATURES};

#[derive(Debug, Clone, PartialEq)]
pub struct Standardizer {
    mean:  Vec<f64>,
    scale: Vec<f64>,
}

impl Standardizer {
    /// Rebuild a standardizer from persisted parameters.
    pub fn from_params(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if mean.len() != NUM_FEATURES || scale.len() != NUM_FEATURES {
            bail!(
                "Scaler parameters must have {} entries (got mean={}, scale={})",
                NUM_FEATURES,
                mean.len(),
                scale.len()
            );
        }
        Ok(Self { mean, scale })
    }

    /// Fit mean and scale on every row.
    pub fn fit(rows: &[FeatureVector]) -> Result<Self> {
        if rows.is_empty() {
            bail!("Cannot fit a standardizer on zero rows");
        }
        let n = rows.len() as f64;

        let mut mean = vec![0.0f64; NUM_FEATURES];
        for row in rows {
            for (m, &x) in mean.iter_mut().zip(row.0.iter()) {
                *m += x as f64;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut var = vec![0.0f64; NUM_FEATURES];
        for row in rows {
            for ((v, &x), m) in var.iter_mut().zip(row.0.iter()).zip(&mean) {
                let d = x as f64 - m;
                *v += d * d;
            }
        }

        let scale = var
            .into_iter()
            .map(|v| {
                let sd = (v / n).sqrt();
                if sd == 0.0 { 1.0 } else { sd }
            })
            .collect();

        Ok(Self { mean, scale })
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    pub fn transform(&self, row: &FeatureVector) -> FeatureVector {
        let mut out = [0.0f32; NUM_FEATURES];
        for (i, v) in out.iter_mut().enumerate() {
            *v = ((row.0[i] as f64 - self.mean[i]) / self.scale[i]) as f32;
        }
        FeatureVector(out)
    }

    pub fn transform_all(&self, rows: &[FeatureVector]) -> Vec<FeatureVector> {
        rows.iter().map(|r| self.transform(r)).collect()
    }
}
