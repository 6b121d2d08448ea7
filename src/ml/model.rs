use burn::{
    module::Param,
    nn::{
        loss::BinaryCrossEntropyLossConfig,
        BatchNorm, BatchNormConfig,
        Dropout, DropoutConfig,
        Initializer, Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{relu, sigmoid},
};

// #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct GhostNetConfig {
    #[config(default = 13)]
    pub num_features: usize,
    #[config(default = 64)]
    pub hidden1: usize,
    #[config(default = 32)]
    pub hidden2: usize,
    #[config(default = 16)]
    pub hidden3: usize,
    #[config(default = 0.3)]
    pub dropout1: f64,
    #[config(default = 0.2)]
    pub dropout2: f64,
    /// Batch-norm epsilon (Keras default)
    #[config(default = 1e-3)]
    pub bn_epsilon: f64,
    /// Weight of the current batch in the running statistics
    #[config(default = 0.01)]
    pub bn_momentum: f64,
}

impl GhostNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> GhostNet<B> {
        GhostNet {
            dense1:   dense(self.num_features, self.hidden1, device),
            norm1:    self.batch_norm(self.hidden1, device),
            dropout1: DropoutConfig::new(self.dropout1).init(),
            dense2:   dense(self.hidden1, self.hidden2, device),
            norm2:    self.batch_norm(self.hidden2, device),
            dropout2: DropoutConfig::new(self.dropout2).init(),
            dense3:   dense(self.hidden2, self.hidden3, device),
            output:   dense(self.hidden3, 1, device),
        }
    }

    fn batch_norm<B: Backend>(&self, features: usize, device: &B::Device) -> BatchNorm<B, 0> {
        BatchNormConfig::new(features)
            .with_epsilon(self.bn_epsilon)
            .with_momentum(self.bn_momentum)
            .init(device)
    }
}

/// Glorot-uniform kernel and zero bias, the Keras Dense defaults
fn dense<B: Backend>(d_input: usize, d_output: usize, device: &B::Device) -> Linear<B> {
    let mut linear = LinearConfig::new(d_input, d_output)
        .with_initializer(Initializer::XavierUniform { gain: 1.0 })
        .init(device);
    linear.bias = Some(Param::from_tensor(Tensor::zeros([d_output], device)));
    linear
}

impl Default for GhostNetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Dense(64, relu) → BN → Dropout → Dense(32, relu) → BN → Dropout
/// → Dense(16, relu) → Dense(1) → sigmoid
///
/// Dropout is only active and batch norm only uses batch statistics
/// on an autodiff backend; `model.valid()` gives the inference form.
#[derive(Module, Debug)]
pub struct GhostNet<B: Backend> {
    pub dense1:   Linear<B>,
    pub norm1:    BatchNorm<B, 0>,
    pub dropout1: Dropout,
    pub dense2:   Linear<B>,
    pub norm2:    BatchNorm<B, 0>,
    pub dropout2: Dropout,
    pub dense3:   Linear<B>,
    pub output:   Linear<B>,
}

impl<B: Backend> GhostNet<B> {
    /// features: [batch, 13] → logits: [batch, 1]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.dense1.forward(features));
        let x = self.dropout1.forward(self.norm1.forward(x));
        let x = relu(self.dense2.forward(x));
        let x = self.dropout2.forward(self.norm2.forward(x));
        let x = relu(self.dense3.forward(x));
        self.output.forward(x)
    }

    /// features: [batch, 13] → ghost probabilities: [batch]
    pub fn predict_proba(&self, features: Tensor<B, 2>) -> Tensor<B, 1> {
        let logits = self.forward(features);
        let [batch, _] = logits.dims();
        sigmoid(logits).reshape([batch])
    }

    /// Mean binary cross-entropy plus the logits it was computed from.
    /// Computed on logits so the sigmoid and log are fused.
    pub fn forward_loss(
        &self,
        features: Tensor<B, 2>,
        labels:   Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 1>) {
        let logits     = self.forward(features);
        let [batch, _] = logits.dims();
        let logits     = logits.reshape([batch]);
        let loss = BinaryCrossEntropyLossConfig::new()
            .with_logits(true)
            .init(&logits.device())
            .forward(logits.clone(), labels);
        (loss, logits)
    }

    /// Number of trainable scalars (kernels, biases, BN gamma/beta).
    pub fn trainable_params(&self) -> usize {
        let linear = |l: &Linear<B>| {
            let [i, o] = l.weight.val().dims();
            i * o + o
        };
        let norm = |n: &BatchNorm<B, 0>| 2 * n.gamma.val().dims()[0];
        linear(&self.dense1) + linear(&self.dense2) + linear(&self.dense3) + linear(&self.output)
            + norm(&self.norm1) + norm(&self.norm2)
    }

    /// Trainable plus the batch-norm running mean/variance,
    /// matching the total Keras reports for the same network.
    pub fn total_params(&self) -> usize {
        let running = self.norm1.gamma.val().dims()[0] + self.norm2.gamma.val().dims()[0];
        self.trainable_params() + 2 * running
    }
}

/// Number of correct predictions at the 0.5 threshold.
pub fn count_correct<B: Backend>(logits: Tensor<B, 1>, labels: Tensor<B, 1, Int>) -> usize {
    let preds = sigmoid(logits).greater_elem(0.5).int();
    preds.equal(labels).int().sum().into_scalar().elem::<i64>() as usize
}
