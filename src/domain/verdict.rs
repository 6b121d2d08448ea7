// ============================================================
// Layer 3 - Verdict
// ============================================================
// Maps the network's ghost probability onto a three-way,
// human-readable classification. Both thresholds are closed:
// exactly 0.6 is a ghost, exactly 0.4 is real.

use std::fmt;

/// At or above this probability the posting is likely a ghost
pub const GHOST_THRESHOLD: f32 = 0.6;

/// At or below this probability the posting is probably real
pub const REAL_THRESHOLD: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    LikelyGhost,
    Uncertain,
    ProbablyReal,
}

impl Verdict {
    pub fn from_probability(p: f32) -> Self {
        if p >= GHOST_THRESHOLD {
            Verdict::LikelyGhost
        } else if p <= REAL_THRESHOLD {
            Verdict::ProbablyReal
        } else {
            Verdict::Uncertain
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::LikelyGhost  => "Likely ghost",
            Verdict::Uncertain    => "Uncertain",
            Verdict::ProbablyReal => "Probably real",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_map_to_verdicts() {
        assert_eq!(Verdict::from_probability(0.65), Verdict::LikelyGhost);
        assert_eq!(Verdict::from_probability(0.5),  Verdict::Uncertain);
        assert_eq!(Verdict::from_probability(0.35), Verdict::ProbablyReal);
    }

    #[test]
    fn test_boundaries_are_closed() {
        assert_eq!(Verdict::from_probability(0.6), Verdict::LikelyGhost);
        assert_eq!(Verdict::from_probability(0.4), Verdict::ProbablyReal);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(Verdict::from_probability(1.0), Verdict::LikelyGhost);
        assert_eq!(Verdict::from_probability(0.0), Verdict::ProbablyReal);
    }

    #[test]
    fn test_display_text() {
        assert_eq!(Verdict::LikelyGhost.to_string(),  "Likely ghost");
        assert_eq!(Verdict::ProbablyReal.to_string(), "Probably real");
        assert_eq!(Verdict::Uncertain.to_string(),    "Uncertain");
    }
}
