// ============================================================
// Layer 3 - Heuristic Ghost Score
// ============================================================
// A points table over PostingSignals that needs no trained
// model. Warning signs add points, good signs subtract them,
// and the total is clamped to 0..=100:
//
//   age       90+ days +30 | 60+ +20 | 30+ +10 | under 7 -10
//   repost    +15
//   applicants 1000+ +25 | 500+ +20 | 200+ +10 | under 50 -5
//   salary    none +15 | listed -10, plus +15 for a 50k+ spread
//   wording   "competitive" +10, staffing +10, "for client" +15,
//             entry level asking 5+ years +25, red flags 5..15 each
//   good      hiring manager -10, benefits -5
//
// Unknown age or applicant count (-1) scores nothing either way.

use std::fmt;

use crate::domain::signals::{PostingSignals, RedFlag};

/// Scores at or above this count as a ghost posting
pub const DEFAULT_GHOST_THRESHOLD: u32 = 50;

pub const MAX_SCORE: i32 = 100;

const LARGE_SALARY_SPREAD: f32 = 50_000.0;

fn red_flag_points(flag: RedFlag) -> i32 {
    match flag {
        RedFlag::FastPaced    => 5,
        RedFlag::LikeFamily   => 10,
        RedFlag::ManyHats     => 10,
        RedFlag::SelfStarter  => 5,
        RedFlag::UnlimitedPto => 5,
        RedFlag::GroundFloor  => 10,
        RedFlag::Rockstar     => 10,
        RedFlag::Hustle       => 10,
        RedFlag::UrgentHire   => 15,
    }
}

/// Outcome of the points table for one posting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhostScore {
    /// Clamped to 0..=100
    pub points:    u32,
    pub threshold: u32,
    /// Warning signs that added points, in table order
    pub reasons:   Vec<String>,
}

impl GhostScore {
    pub fn is_ghost(&self) -> bool {
        self.points >= self.threshold
    }
}

impl fmt::Display for GhostScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ghost score: {}/{} (threshold {})", self.points, MAX_SCORE, self.threshold)?;
        if !self.reasons.is_empty() {
            writeln!(f, "Reasons: {}", self.reasons.join(", "))?;
        }
        let verdict = if self.is_ghost() { "Likely ghost" } else { "Not flagged" };
        write!(f, "Heuristic verdict: {verdict}")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HeuristicScorer {
    threshold: u32,
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new(DEFAULT_GHOST_THRESHOLD)
    }
}

impl HeuristicScorer {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn score(&self, s: &PostingSignals) -> GhostScore {
        let mut points  = 0i32;
        let mut reasons = Vec::new();
        let mut add = |pts: i32, why: &str| {
            points += pts;
            reasons.push(why.to_string());
        };

        // Age and reposting
        if s.age_days >= 90.0 {
            add(30, "90+ days old");
        } else if s.age_days >= 60.0 {
            add(20, "60+ days old");
        } else if s.age_days >= 30.0 {
            add(10, "30+ days old");
        }
        if s.is_repost {
            add(15, "reposted");
        }

        // Applicant volume
        if s.applicants >= 1000.0 {
            add(25, "1000+ applicants");
        } else if s.applicants >= 500.0 {
            add(20, "500+ applicants");
        } else if s.applicants >= 200.0 {
            add(10, "200+ applicants");
        }

        // Salary
        match s.salary_range {
            None => add(15, "no salary"),
            Some(spread) if spread >= LARGE_SALARY_SPREAD => add(15, "$50k+ range"),
            Some(_) => {}
        }
        if s.competitive_salary {
            add(10, "\"competitive\" = low");
        }

        // Who is hiring, and for what
        if s.is_staffing {
            add(10, "staffing agency");
        }
        if s.for_client {
            add(15, "\"for client\"");
        }
        if s.entry_high_exp {
            add(25, "entry wants 5+ yrs");
        }
        for flag in &s.red_flags {
            add(red_flag_points(*flag), &flag.to_string());
        }

        // Good signs carry no reason text
        if (0.0..7.0).contains(&s.age_days) {
            points -= 10;
        }
        if (0.0..50.0).contains(&s.applicants) {
            points -= 5;
        }
        if s.salary_range.is_some() {
            points -= 10;
        }
        if s.has_manager {
            points -= 10;
        }
        if s.has_benefits {
            points -= 5;
        }

        let points = points.clamp(0, MAX_SCORE) as u32;
        tracing::debug!("Heuristic score {} from {} reason(s)", points, reasons.len());
        GhostScore { points, threshold: self.threshold, reasons }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// Nothing found at all: only the missing salary scores
    fn blank() -> PostingSignals {
        PostingSignals {
            age_days:           -1.0,
            applicants:         -1.0,
            salary_range:       None,
            text_length:        0,
            red_flags:          Vec::new(),
            is_staffing:        false,
            is_repost:          false,
            entry_high_exp:     false,
            for_client:         false,
            has_benefits:       false,
            has_manager:        false,
            competitive_salary: false,
        }
    }

    #[test]
    fn test_blank_posting_scores_missing_salary_only() {
        let score = HeuristicScorer::default().score(&blank());
        assert_eq!(score.points, 15);
        assert_eq!(score.reasons, ["no salary"]);
        assert!(!score.is_ghost());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // 60+ days (20) + reposted (15) + no salary (15) = 50
        let signals = PostingSignals { age_days: 60.0, is_repost: true, ..blank() };
        let score   = HeuristicScorer::default().score(&signals);
        assert_eq!(score.points, 50);
        assert!(score.is_ghost());
        assert!(!HeuristicScorer::new(51).score(&signals).is_ghost());
    }

    #[test]
    fn test_clamps_to_hundred() {
        let signals = PostingSignals {
            age_days:           120.0,
            applicants:         3000.0,
            red_flags:          RedFlag::ALL.to_vec(),
            is_staffing:        true,
            is_repost:          true,
            entry_high_exp:     true,
            for_client:         true,
            competitive_salary: true,
            ..blank()
        };
        let score = HeuristicScorer::default().score(&signals);
        assert_eq!(score.points, 100);
        assert!(score.reasons.contains(&"\"urgent hire\"".to_string()));
    }

    #[test]
    fn test_clamps_to_zero() {
        let signals = PostingSignals {
            age_days:     1.0,
            applicants:   12.0,
            salary_range: Some(10_000.0),
            has_manager:  true,
            has_benefits: true,
            ..blank()
        };
        let score = HeuristicScorer::default().score(&signals);
        assert_eq!(score.points, 0);
        assert!(score.reasons.is_empty());
    }

    #[test]
    fn test_wide_salary_spread_still_counts_as_listed() {
        // -10 for a listed salary, +15 for the spread
        let signals = PostingSignals { salary_range: Some(60_000.0), age_days: 40.0, ..blank() };
        let score   = HeuristicScorer::default().score(&signals);
        assert_eq!(score.points, 15);
        assert_eq!(score.reasons, ["30+ days old", "$50k+ range"]);
    }

    #[test]
    fn test_red_flags_weigh_differently() {
        let mild   = PostingSignals { red_flags: vec![RedFlag::FastPaced], ..blank() };
        let urgent = PostingSignals { red_flags: vec![RedFlag::UrgentHire], ..blank() };
        let scorer = HeuristicScorer::default();
        assert_eq!(scorer.score(&mild).points, 20);
        assert_eq!(scorer.score(&urgent).points, 30);
    }

    #[test]
    fn test_display_lists_reasons_and_verdict() {
        let signals = PostingSignals { age_days: 95.0, for_client: true, ..blank() };
        let text    = HeuristicScorer::default().score(&signals).to_string();
        assert!(text.starts_with("Ghost score: 60/100 (threshold 50)"));
        assert!(text.contains("Reasons: 90+ days old, no salary, \"for client\""));
        assert!(text.ends_with("Heuristic verdict: Likely ghost"));
    }
}
