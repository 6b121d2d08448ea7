// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// This layer handles everything from raw CSV rows and posting
// text all the way to tensor batches.
//
// Training flows in this order:
//
//   training_data.csv
//       │
//       ▼
//   CsvPostingLoader  → reads rows into PostingRecords
//       │
//       ▼
//   Standardizer      → fits mean/scale, standardizes features
//       │
//       ▼
//   split_train_test  → seeded 80/20 shuffle split
//       │
//       ▼
//   PostingDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   PostingBatcher    → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Posting text takes a shorter path:
//
//   raw text → Preprocessor → FeatureExtractor → FeatureVector
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads the labelled training CSV
pub mod loader;

/// Cleans and normalises raw posting text
pub mod preprocessor;

/// Rule-based feature extraction from posting text
pub mod extractor;

/// Per-feature mean/scale standardization
pub mod standardizer;

/// Implements Burn's Dataset trait for posting samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/test sets
pub mod splitter;
