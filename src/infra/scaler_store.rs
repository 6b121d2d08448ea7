// ============================================================
// Layer 6 - Standardizer Persistence
// ============================================================
// Stores the fitted per-feature mean and scale as two float64
// NumPy arrays next to the model:
//
//   trained_model/
//     scaler_mean.npy
//     scaler_scale.npy
//
// The .npy format keeps the parameters readable from Python and
// from the browser tooling without a custom parser.

use anyhow::{Context, Result};
use ndarray::Array1;
use ndarray_npy::{read_npy, write_npy};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::standardizer::Standardizer;

const MEAN_FILE:  &str = "scaler_mean.npy";
const SCALE_FILE: &str = "scaler_scale.npy";

pub struct ScalerStore {
    dir: PathBuf,
}

impl ScalerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn mean_path(&self) -> PathBuf {
        self.dir.join(MEAN_FILE)
    }

    pub fn scale_path(&self) -> PathBuf {
        self.dir.join(SCALE_FILE)
    }

    pub fn save(&self, scaler: &Standardizer) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        write_array(&self.mean_path(), scaler.mean())?;
        write_array(&self.scale_path(), scaler.scale())?;

        tracing::debug!("Saved standardizer parameters to '{}'", self.dir.display());
        Ok(())
    }

    pub fn load(&self) -> Result<Standardizer> {
        let mean  = read_array(&self.mean_path())?;
        let scale = read_array(&self.scale_path())?;
        Standardizer::from_params(mean, scale)
    }
}

fn write_array(path: &Path, values: &[f64]) -> Result<()> {
    let array = Array1::from(values.to_vec());
    write_npy(path, &array).with_context(|| format!("Cannot write '{}'", path.display()))
}

fn read_array(path: &Path) -> Result<Vec<f64>> {
    let array: Array1<f64> = read_npy(path).with_context(|| {
        format!("Cannot read '{}'. Have you run 'train' first?", path.display())
    })?;
    Ok(array.to_vec())
}
