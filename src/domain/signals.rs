// ============================================================
// Layer 3 - Posting Signals
// ============================================================
// Everything the extractor finds in one posting's text, before
// it is flattened into the 13-number FeatureVector. The model
// only needs the count of red flags; the heuristic score weighs
// each red flag separately, so the full list is kept here.

use std::fmt;

use crate::domain::posting::{FeatureVector, NUM_FEATURES};

/// One family of red-flag wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedFlag {
    FastPaced,
    LikeFamily,
    ManyHats,
    SelfStarter,
    UnlimitedPto,
    GroundFloor,
    Rockstar,
    Hustle,
    UrgentHire,
}

#[cfg(test)]
impl RedFlag {
    pub const ALL: [RedFlag; 9] = [
        RedFlag::FastPaced,
        RedFlag::LikeFamily,
        RedFlag::ManyHats,
        RedFlag::SelfStarter,
        RedFlag::UnlimitedPto,
        RedFlag::GroundFloor,
        RedFlag::Rockstar,
        RedFlag::Hustle,
        RedFlag::UrgentHire,
    ];
}

impl fmt::Display for RedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RedFlag::FastPaced    => "\"fast-paced\"",
            RedFlag::LikeFamily   => "\"like family\"",
            RedFlag::ManyHats     => "\"many hats\"",
            RedFlag::SelfStarter  => "\"self-starter\"",
            RedFlag::UnlimitedPto => "\"unlimited PTO\"",
            RedFlag::GroundFloor  => "\"ground floor\"",
            RedFlag::Rockstar     => "\"rockstar/ninja\"",
            RedFlag::Hustle       => "\"hustle\"",
            RedFlag::UrgentHire   => "\"urgent hire\"",
        };
        f.write_str(s)
    }
}

/// Signals found in one posting.
/// `age_days` and `applicants` are -1 when the text does not say.
#[derive(Debug, Clone, PartialEq)]
pub struct PostingSignals {
    pub age_days:           f32,
    pub applicants:         f32,
    /// hi - lo of the first plausible salary; None when no salary
    /// is listed. Negative when the range is written high-to-low.
    pub salary_range:       Option<f32>,
    pub text_length:        usize,
    pub red_flags:          Vec<RedFlag>,
    pub is_staffing:        bool,
    pub is_repost:          bool,
    pub entry_high_exp:     bool,
    pub for_client:         bool,
    pub has_benefits:       bool,
    pub has_manager:        bool,
    pub competitive_salary: bool,
}

impl PostingSignals {
    /// Flatten into model input order
    pub fn features(&self) -> FeatureVector {
        let features: [f32; NUM_FEATURES] = [
            self.age_days,
            self.applicants,
            flag(self.salary_range.is_some()),
            self.salary_range.unwrap_or(0.0),
            self.text_length as f32,
            self.red_flags.len() as f32,
            flag(self.is_staffing),
            flag(self.is_repost),
            flag(self.entry_high_exp),
            flag(self.for_client),
            flag(self.has_benefits),
            flag(self.has_manager),
            flag(self.competitive_salary),
        ];
        FeatureVector(features)
    }
}

fn flag(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_follow_column_order() {
        let signals = PostingSignals {
            age_days:           14.0,
            applicants:         -1.0,
            salary_range:       Some(-30_000.0),
            text_length:        420,
            red_flags:          vec![RedFlag::Hustle, RedFlag::ManyHats],
            is_staffing:        false,
            is_repost:          true,
            entry_high_exp:     false,
            for_client:         false,
            has_benefits:       true,
            has_manager:        false,
            competitive_salary: false,
        };
        let f = signals.features().0;
        assert_eq!(f[..6], [14.0, -1.0, 1.0, -30_000.0, 420.0, 2.0]);
        assert_eq!(f[7], 1.0);
        assert_eq!(f[10], 1.0);
    }
}
