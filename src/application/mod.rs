// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// one command (train, test, convert or extract).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing of final results (that's Layer 1); use cases
//     return reports the CLI renders
//   - No direct file formats (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// CSV → standardizer → trained network
pub mod train_use_case;

// One feature vector → probability + verdict
pub mod predict_use_case;

// Trained network → TF.js layers model
pub mod convert_use_case;

// Posting text → feature vector
pub mod extract_use_case;
