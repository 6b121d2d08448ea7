// ============================================================
// Layer 6 - TensorFlow.js Exporter
// ============================================================
// Writes a trained GhostNet in the TF.js "layers-model" format so
// the browser userscripts can load it with tf.loadLayersModel():
//
//   tfjs_model/
//     model.json            ← Keras Sequential topology + manifest
//     group1-shard1of1.bin  ← all weights, little-endian float32
//
// Layer names follow Keras' automatic naming (dense, dense_1, ...,
// batch_normalization, ...). Weights are written in the order
// Keras stores them:
//
//   Dense               kernel [in, out], bias [out]
//   BatchNormalization  gamma, beta, moving_mean, moving_variance
//
// Burn's Linear stores its weight as [in, out] and BatchNorm uses
// momentum as the weight of the *new* batch, so Keras' momentum is
// 1 - bn_momentum.
//
// Reference: TensorFlow.js converter, tfjs-layers model format

use anyhow::{anyhow, Context, Result};
use burn::{
    nn::{BatchNorm, Linear},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::ml::model::{GhostNet, GhostNetConfig};

pub const MODEL_FILE:   &str = "model.json";
pub const WEIGHTS_FILE: &str = "group1-shard1of1.bin";

const FORMAT: &str = "layers-model";

/// Top-level document of a TF.js layers model
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfjsModel {
    pub format:           String,
    pub generated_by:     String,
    pub converted_by:     Option<String>,
    pub model_topology:   Value,
    pub weights_manifest: Vec<WeightGroup>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeightGroup {
    pub paths:   Vec<String>,
    pub weights: Vec<WeightSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightSpec {
    pub name:  String,
    pub shape: Vec<usize>,
    pub dtype: String,
}

/// One named weight tensor, flattened row-major
struct NamedWeight {
    spec:   WeightSpec,
    values: Vec<f32>,
}

impl NamedWeight {
    fn new(name: String, shape: Vec<usize>, values: Vec<f32>) -> Self {
        let spec = WeightSpec { name, shape, dtype: "float32".to_string() };
        Self { spec, values }
    }
}

/// Export `model` into `out_dir`, creating it if needed.
/// Returns the paths of the files written.
pub fn export<B: Backend>(
    model:   &GhostNet<B>,
    config:  &GhostNetConfig,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let weights = collect_weights(model)?;

    let document = TfjsModel {
        format:           FORMAT.to_string(),
        generated_by:     format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        converted_by:     None,
        model_topology:   topology(config),
        weights_manifest: vec![WeightGroup {
            paths:   vec![WEIGHTS_FILE.to_string()],
            weights: weights.iter().map(|w| w.spec.clone()).collect(),
        }],
    };

    let mut shard = Vec::with_capacity(weights.iter().map(|w| w.values.len() * 4).sum());
    for w in &weights {
        for v in &w.values {
            shard.extend_from_slice(&v.to_le_bytes());
        }
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Cannot create '{}'", out_dir.display()))?;

    let model_path   = out_dir.join(MODEL_FILE);
    let weights_path = out_dir.join(WEIGHTS_FILE);

    fs::write(&model_path, serde_json::to_string(&document)?)
        .with_context(|| format!("Cannot write '{}'", model_path.display()))?;
    fs::write(&weights_path, &shard)
        .with_context(|| format!("Cannot write '{}'", weights_path.display()))?;

    tracing::info!(
        "Exported {} weight tensors ({} bytes) to '{}'",
        weights.len(), shard.len(), out_dir.display(),
    );
    Ok(vec![model_path, weights_path])
}

fn collect_weights<B: Backend>(model: &GhostNet<B>) -> Result<Vec<NamedWeight>> {
    let mut out = Vec::new();
    dense_weights("dense", &model.dense1, &mut out)?;
    norm_weights("batch_normalization", &model.norm1, &mut out)?;
    dense_weights("dense_1", &model.dense2, &mut out)?;
    norm_weights("batch_normalization_1", &model.norm2, &mut out)?;
    dense_weights("dense_2", &model.dense3, &mut out)?;
    dense_weights("dense_3", &model.output, &mut out)?;
    Ok(out)
}

fn dense_weights<B: Backend>(name: &str, layer: &Linear<B>, out: &mut Vec<NamedWeight>) -> Result<()> {
    let kernel = layer.weight.val();
    let shape  = kernel.dims().to_vec();
    out.push(NamedWeight::new(format!("{name}/kernel"), shape, floats(kernel)?));

    let bias = layer.bias
        .as_ref()
        .ok_or_else(|| anyhow!("Layer '{name}' has no bias"))?
        .val();
    let shape = bias.dims().to_vec();
    out.push(NamedWeight::new(format!("{name}/bias"), shape, floats(bias)?));
    Ok(())
}

fn norm_weights<B: Backend>(name: &str, layer: &BatchNorm<B, 0>, out: &mut Vec<NamedWeight>) -> Result<()> {
    let tensors = [
        ("gamma",           layer.gamma.val()),
        ("beta",            layer.beta.val()),
        ("moving_mean",     layer.running_mean.value()),
        ("moving_variance", layer.running_var.value()),
    ];
    for (suffix, t) in tensors {
        let shape = t.dims().to_vec();
        out.push(NamedWeight::new(format!("{name}/{suffix}"), shape, floats(t)?));
    }
    Ok(())
}

fn floats<B: Backend, const D: usize>(t: Tensor<B, D>) -> Result<Vec<f32>> {
    t.into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| anyhow!("Cannot read weights: {e:?}"))
}

fn topology(cfg: &GhostNetConfig) -> Value {
    let mut first = dense_layer("dense", cfg.hidden1, "relu");
    first["config"]["batch_input_shape"] = json!([null, cfg.num_features]);

    let layers = vec![
        first,
        norm_layer("batch_normalization", cfg),
        dropout_layer("dropout", cfg.dropout1),
        dense_layer("dense_1", cfg.hidden2, "relu"),
        norm_layer("batch_normalization_1", cfg),
        dropout_layer("dropout_1", cfg.dropout2),
        dense_layer("dense_2", cfg.hidden3, "relu"),
        dense_layer("dense_3", 1, "sigmoid"),
    ];

    json!({
        "class_name": "Sequential",
        "config": { "name": "ghost_net", "layers": layers },
        "keras_version": "tfjs-layers",
        "backend": "tensor_flow.js",
    })
}

fn dense_layer(name: &str, units: usize, activation: &str) -> Value {
    json!({
        "class_name": "Dense",
        "config": {
            "name": name,
            "trainable": true,
            "dtype": "float32",
            "units": units,
            "activation": activation,
            "use_bias": true,
            "kernel_initializer": { "class_name": "GlorotUniform", "config": { "seed": null } },
            "bias_initializer": { "class_name": "Zeros", "config": {} },
            "kernel_regularizer": null,
            "bias_regularizer": null,
            "activity_regularizer": null,
            "kernel_constraint": null,
            "bias_constraint": null,
        }
    })
}

fn norm_layer(name: &str, cfg: &GhostNetConfig) -> Value {
    json!({
        "class_name": "BatchNormalization",
        "config": {
            "name": name,
            "trainable": true,
            "dtype": "float32",
            "axis": -1,
            "momentum": 1.0 - cfg.bn_momentum,
            "epsilon": cfg.bn_epsilon,
            "center": true,
            "scale": true,
            "beta_initializer": { "class_name": "Zeros", "config": {} },
            "gamma_initializer": { "class_name": "Ones", "config": {} },
            "moving_mean_initializer": { "class_name": "Zeros", "config": {} },
            "moving_variance_initializer": { "class_name": "Ones", "config": {} },
            "beta_regularizer": null,
            "gamma_regularizer": null,
            "beta_constraint": null,
            "gamma_constraint": null,
        }
    })
}

fn dropout_layer(name: &str, rate: f64) -> Value {
    json!({
        "class_name": "Dropout",
        "config": {
            "name": name,
            "trainable": true,
            "dtype": "float32",
            "rate": rate,
            "noise_shape": null,
            "seed": null,
        }
    })
}
