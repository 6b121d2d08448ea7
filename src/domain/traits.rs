// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The application layer talks to these traits rather than to
// concrete loaders, so the CSV loader and any future source
// (a database export, a scraped feed) are interchangeable.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::posting::{FeatureVector, PostingRecord};

// ─── PostingSource ────────────────────────────────────────────────────────────
/// Any component that can produce labelled postings.
///
/// Implementations:
///   - CsvPostingLoader → reads a training CSV
pub trait PostingSource {
    fn load_all(&self) -> Result<Vec<PostingRecord>>;
}

// ─── GhostScorer ──────────────────────────────────────────────────────────────
/// Any component that turns raw (unscaled) features into a
/// ghost probability in [0, 1].
///
/// Implementations:
///   - PredictUseCase → standardizer + trained network
pub trait GhostScorer {
    fn score(&self, features: &FeatureVector) -> Result<f32>;
}
