// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Handles the on-disk formats that don't belong in any
// specific business layer:
//
//   checkpoint.rs   - Saving and loading model weights
//                     Burn's named MessagePack and pretty JSON
//                     recorders, mpk preferred on load.
//
//   scaler_store.rs - Standardizer persistence
//                     Mean and scale as float64 .npy arrays
//                     so inference reuses the training fit.
//
//   tfjs.rs         - TensorFlow.js export
//                     Keras-style topology, weights manifest
//                     and a single float32 weight shard.
//
//   metrics.rs      - Training metrics logging
//                     Writes epoch-level metrics (loss,
//                     accuracy) to an optional CSV file.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model weight saving and loading
pub mod checkpoint;

/// Standardizer mean/scale persistence
pub mod scaler_store;

/// TensorFlow.js layers-model exporter
pub mod tfjs;

/// Training metrics CSV logger
pub mod metrics;
