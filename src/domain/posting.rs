// ============================================================
// Layer 3 - Job Posting Domain Types
// ============================================================
// A job posting is described by 13 numeric features. The order
// of FEATURE_NAMES is the order the network sees them in, for
// training and for inference alike.
//
// Reference: Rust Book §5 (Structs), §8 (Arrays and Vectors)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of input features per posting
pub const NUM_FEATURES: usize = 13;

/// Column names in model input order.
/// These are also the CSV headers the trainer expects.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "age_days",
    "applicants",
    "has_salary",
    "salary_range",
    "text_length",
    "red_flag_count",
    "is_staffing",
    "is_repost",
    "entry_high_exp",
    "for_client",
    "has_benefits",
    "has_manager",
    "competitive_salary",
];

/// Name of the label column in the training CSV
pub const LABEL_COLUMN: &str = "label";

/// Full CSV header line, label first.
pub fn csv_header() -> String {
    std::iter::once(LABEL_COLUMN)
        .chain(FEATURE_NAMES.iter().copied())
        .collect::<Vec<_>>()
        .join(",")
}

// ─── FeatureVector ───────────────────────────────────────────────────────────
/// One posting's features in model input order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f32; NUM_FEATURES]);

impl FeatureVector {
    /// Build a vector from the first NUM_FEATURES values of a slice.
    /// Returns None when the slice is too short.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        if values.len() < NUM_FEATURES {
            return None;
        }
        let mut out = [0.0f32; NUM_FEATURES];
        for (dst, src) in out.iter_mut().zip(values) {
            *dst = *src as f32;
        }
        Some(Self(out))
    }

    /// Pairs of (column name, value), in model order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

/// Prints the vector as space-separated numbers, the same shape
/// the `test` subcommand takes on its command line.
impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| format!("{v}")).collect();
        write!(f, "{}", parts.join(" "))
    }
}

// ─── PostingRecord ───────────────────────────────────────────────────────────
/// One row of the training CSV.
/// Columns are matched by header name, so the file may list them
/// in any order; the model order comes from `features()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingRecord {
    /// 1 = ghost, 0 = real
    pub label: u8,

    pub age_days:           f32,
    pub applicants:         f32,
    pub has_salary:         f32,
    pub salary_range:       f32,
    pub text_length:        f32,
    pub red_flag_count:     f32,
    pub is_staffing:        f32,
    pub is_repost:          f32,
    pub entry_high_exp:     f32,
    pub for_client:         f32,
    pub has_benefits:       f32,
    pub has_manager:        f32,
    pub competitive_salary: f32,
}

impl PostingRecord {
    #[cfg(test)]
    pub fn new(label: u8, features: FeatureVector) -> Self {
        let f = features.0;
        Self {
            label,
            age_days:           f[0],
            applicants:         f[1],
            has_salary:         f[2],
            salary_range:       f[3],
            text_length:        f[4],
            red_flag_count:     f[5],
            is_staffing:        f[6],
            is_repost:          f[7],
            entry_high_exp:     f[8],
            for_client:         f[9],
            has_benefits:       f[10],
            has_manager:        f[11],
            competitive_salary: f[12],
        }
    }

    /// Features in FEATURE_NAMES order
    pub fn features(&self) -> FeatureVector {
        FeatureVector([
            self.age_days,
            self.applicants,
            self.has_salary,
            self.salary_range,
            self.text_length,
            self.red_flag_count,
            self.is_staffing,
            self.is_repost,
            self.entry_high_exp,
            self.for_client,
            self.has_benefits,
            self.has_manager,
            self.competitive_salary,
        ])
    }

    pub fn is_ghost(&self) -> bool {
        self.label == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_starts_with_label() {
        let header = csv_header();
        assert!(header.starts_with("label,age_days,applicants"));
        assert!(header.ends_with("has_manager,competitive_salary"));
        assert_eq!(header.split(',').count(), NUM_FEATURES + 1);
    }

    #[test]
    fn test_record_round_trips_feature_order() {
        let values: Vec<f64> = (0..NUM_FEATURES).map(|i| i as f64).collect();
        let fv     = FeatureVector::from_slice(&values).unwrap();
        let record = PostingRecord::new(1, fv);
        assert_eq!(record.features(), fv);
        assert_eq!(record.text_length, 4.0);
        assert!(record.is_ghost());
    }

    #[test]
    fn test_from_slice_needs_all_features() {
        let values = vec![1.0; NUM_FEATURES - 1];
        assert!(FeatureVector::from_slice(&values).is_none());
    }

    #[test]
    fn test_display_is_space_separated() {
        let fv = FeatureVector([1.0; NUM_FEATURES]);
        assert_eq!(fv.to_string().split(' ').count(), NUM_FEATURES);
    }
}
