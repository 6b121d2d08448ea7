// ============================================================
// Layer 5 - ML / Model Layer (Burn)
// ============================================================
// This layer contains the Burn code that defines, trains and
// runs the network. Persistence of the trained weights lives in
// infra/, but only this layer builds or steps a model.
//
// What's in this layer:
//
//   model.rs          - GhostNet, the 13 → 64 → 32 → 16 → 1
//                       feed-forward classifier:
//                       • Dense layers with ReLU
//                       • Batch normalisation after the first two
//                       • Dropout 0.3 / 0.2
//                       • Single logit, sigmoid for probability
//
//   early_stopping.rs - Patience counter on validation accuracy
//
//   trainer.rs        - The training loop
//                       Forward pass, BCE loss, backward pass,
//                       Adam step, validation, early stopping
//                       and best-weight restore
//
//   inferencer.rs     - Loads the saved model and scores one
//                       standardized feature vector
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Ioffe & Szegedy (2015) Batch Normalization

/// Feed-forward ghost job classifier
pub mod model;

/// Patience-based early stopping
pub mod early_stopping;

/// Training loop with validation and best-weight restore
pub mod trainer;

/// Inference engine, loads the model and scores one posting
pub mod inferencer;
