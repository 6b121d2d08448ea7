// ============================================================
// Layer 2 - Extract Use Case
// ============================================================
// Turns posting text into the 13 numbers `test` expects:
//   1. Read the text from a file, or stdin for "-"
//   2. Run the rule-based FeatureExtractor (Layer 4)
//   3. Optionally score the vector with any GhostScorer, or the
//      signals with the model-free heuristic

use anyhow::{Context, Result};
use std::{fs, io::Read};

use crate::data::extractor::FeatureExtractor;
use crate::domain::heuristic::{GhostScore, HeuristicScorer};
use crate::domain::posting::FeatureVector;
use crate::domain::signals::PostingSignals;
use crate::domain::traits::GhostScorer;

use super::predict_use_case::Prediction;

/// Argument value that means "read standard input"
pub const STDIN_MARKER: &str = "-";

pub struct ExtractUseCase {
    extractor: FeatureExtractor,
}

impl ExtractUseCase {
    pub fn new() -> Result<Self> {
        Ok(Self { extractor: FeatureExtractor::new()? })
    }

    /// `input` is a file path, or STDIN_MARKER
    pub fn extract_from(&self, input: &str) -> Result<PostingSignals> {
        if input == STDIN_MARKER {
            self.extract_reader(std::io::stdin().lock(), "stdin")
        } else {
            let text = fs::read_to_string(input)
                .with_context(|| format!("Cannot read posting text from '{input}'"))?;
            tracing::info!("Read {} bytes of posting text from '{}'", text.len(), input);
            Ok(self.extract_text(&text))
        }
    }

    pub fn extract_reader(&self, mut reader: impl Read, source: &str) -> Result<PostingSignals> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .with_context(|| format!("Cannot read posting text from {source}"))?;
        tracing::info!("Read {} bytes of posting text from {}", text.len(), source);
        Ok(self.extract_text(&text))
    }

    pub fn extract_text(&self, text: &str) -> PostingSignals {
        self.extractor.signals(text)
    }

    pub fn score(&self, scorer: &dyn GhostScorer, features: &FeatureVector) -> Result<Prediction> {
        Ok(Prediction::from_probability(scorer.score(features)?))
    }

    pub fn heuristic(&self, signals: &PostingSignals, threshold: u32) -> GhostScore {
        HeuristicScorer::new(threshold).score(signals)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::heuristic::DEFAULT_GHOST_THRESHOLD;
    use crate::domain::verdict::Verdict;
    use std::io::Cursor;

    /// Scores by red-flag count alone
    struct RedFlagScorer;

    impl GhostScorer for RedFlagScorer {
        fn score(&self, features: &FeatureVector) -> Result<f32> {
            Ok((features.0[5] / 4.0).min(1.0))
        }
    }

    /// A reader that always fails
    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_extracts_from_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("posting.txt");
        fs::write(&path, "Posted 3 days ago.\n\n150 applicants.").unwrap();

        let uc = ExtractUseCase::new().unwrap();
        let fv = uc.extract_from(path.to_str().unwrap()).unwrap().features();
        assert_eq!(fv.0[0], 3.0);
        assert_eq!(fv.0[1], 150.0);
    }

    #[test]
    fn test_extracts_from_reader() {
        let uc      = ExtractUseCase::new().unwrap();
        let input   = Cursor::new("Reposted 2 weeks ago by Randstad. 640 applicants.");
        let signals = uc.extract_reader(input, "stdin").unwrap();
        assert_eq!(signals.age_days, 14.0);
        assert_eq!(signals.applicants, 640.0);
        assert!(signals.is_staffing);
        assert!(signals.is_repost);
    }

    #[test]
    fn test_reader_failure_names_source() {
        let uc  = ExtractUseCase::new().unwrap();
        let err = uc.extract_reader(BrokenPipe, "stdin").unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let uc  = ExtractUseCase::new().unwrap();
        let err = uc.extract_from("/definitely/not/here.txt").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_scores_with_any_scorer() {
        let uc = ExtractUseCase::new().unwrap();
        let fv = uc.extract_text("Fast-paced, self-starter who can wear many hats. Hustle!").features();
        let prediction = uc.score(&RedFlagScorer, &fv).unwrap();
        assert_eq!(prediction.probability, 1.0);
        assert_eq!(prediction.verdict, Verdict::LikelyGhost);
    }

    #[test]
    fn test_heuristic_uses_given_threshold() {
        let uc      = ExtractUseCase::new().unwrap();
        let signals = uc.extract_text("Reposted 2 months ago.");
        // 60+ days, reposted, no salary
        assert_eq!(uc.heuristic(&signals, DEFAULT_GHOST_THRESHOLD).points, 50);
        assert!(uc.heuristic(&signals, DEFAULT_GHOST_THRESHOLD).is_ghost());
        assert!(!uc.heuristic(&signals, 80).is_ghost());
    }
}
