// ============================================================
// Layer 4 - Posting Feature Extractor
// ============================================================
// Reads the ghost-job signals out of the plain text of a job
// posting. Each signal is one pattern family:
//
//   age_days        "3 months ago" → 90, "2 weeks ago" → 14,
//                   "5 days ago" → 5, "today"/"hours ago" → 0,
//                   "yesterday" → 1, nothing found → -1
//   applicants      "1,200 applicants" → 1200, "be an early
//                   applicant" → 5, nothing found → -1
//   salary_range    hi - lo of "$lo - $hi" (signed), 0 for a single
//                   figure, None unless lo is within 20k..=500k
//   text_length     characters after preprocessing
//   red_flags       which of the red-flag phrase families hit
//   is_staffing     staffing agency name or "staffing"/"recruiting"
//   is_repost       "repost"
//   entry_high_exp  entry-level wording AND 5+ years experience
//   for_client      "hiring for a client" / "confidential client"
//   has_benefits    401k, health/dental/vision, "benefits include"
//   has_manager     "hiring manager", "reporting to"
//   competitive_salary  "competitive salary|pay|compensation"
//
// PostingSignals::features() flattens these into the model's
// 13 columns, booleans as 0.0 / 1.0.
//
// Reference: regex crate documentation

use anyhow::{Context, Result};
use regex::Regex;

use crate::data::preprocessor::Preprocessor;
use crate::domain::signals::{PostingSignals, RedFlag};

const STAFFING_AGENCIES: [&str; 15] = [
    "robert half", "randstad", "adecco", "manpower", "kelly services",
    "apex systems", "tek systems", "insight global", "cybercoders",
    "kforce", "modis", "aerotek", "beacon hill", "staffing", "recruiting",
];

const RED_FLAG_PATTERNS: [(RedFlag, &str); 9] = [
    (RedFlag::FastPaced,    r"fast[- ]?paced"),
    (RedFlag::LikeFamily,   r"like a family|we('re| are) family"),
    (RedFlag::ManyHats,     r"wear many hats"),
    (RedFlag::SelfStarter,  r"self[- ]?starter"),
    (RedFlag::UnlimitedPto, r"unlimited (pto|paid time off|vacation)"),
    (RedFlag::GroundFloor,  r"ground[- ]?floor|early[- ]?stage startup"),
    (RedFlag::Rockstar,     r"rock\s?star|ninja|guru|wizard"),
    (RedFlag::Hustle,       r"hustle|grind"),
    (RedFlag::UrgentHire,   r"immediate(ly)? (hire|start)|urgent(ly)? (hiring|need)"),
];

const MIN_SALARY: i64 = 20_000;
const MAX_SALARY: i64 = 500_000;
const HIGH_EXPERIENCE_YEARS: u32 = 5;

pub struct FeatureExtractor {
    preprocessor: Preprocessor,
    months_ago:   Regex,
    weeks_ago:    Regex,
    days_ago:     Regex,
    just_posted:  Regex,
    yesterday:    Regex,
    applicants:   Regex,
    early_apply:  Regex,
    salary:       Regex,
    repost:       Regex,
    competitive:  Regex,
    for_client:   Regex,
    entry_level:  Regex,
    years_exp:    Regex,
    manager:      Regex,
    benefits:     Regex,
    red_flags:    Vec<(RedFlag, Regex)>,
}

/// Case-insensitive regex with the pattern in the error context
fn ci(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("(?i){pattern}"))
        .with_context(|| format!("Invalid pattern '{pattern}'"))
}

impl FeatureExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            preprocessor: Preprocessor::new(),
            months_ago:   ci(r"(\d+)\s*(?:month|mo)s?\s*ago")?,
            weeks_ago:    ci(r"(\d+)\s*(?:week|wk)s?\s*ago")?,
            days_ago:     ci(r"(\d+)\s*days?\s*ago")?,
            just_posted:  ci(r"just now|today|hour|minute")?,
            yesterday:    ci(r"yesterday")?,
            applicants:   ci(r"(\d+,?\d*)\+?\s*applicants?")?,
            early_apply:  ci(r"early|first")?,
            salary:       ci(r"\$\s*(\d{2,3}),?(\d{3})(?:\s*[-–]\s*\$?\s*(\d{2,3}),?(\d{3}))?")?,
            repost:       ci(r"repost")?,
            competitive:  ci(r"competitive (?:salary|pay|compensation)")?,
            for_client:   ci(r"hiring for (?:a |our )?client|confidential client")?,
            entry_level:  ci(r"entry[- ]?level|junior|new grad")?,
            years_exp:    ci(r"(\d+)\+?\s*(?:years?|yrs?)\s*(?:of)?\s*(?:experience|exp)")?,
            manager:      ci(r"hiring manager|reporting to|report to")?,
            benefits:     ci(r"401k|health insurance|dental|vision|benefits include")?,
            red_flags:    RED_FLAG_PATTERNS
                .iter()
                .map(|(flag, p)| -> Result<(RedFlag, Regex)> { Ok((*flag, ci(p)?)) })
                .collect::<Result<_>>()?,
        })
    }

    pub fn signals(&self, raw_text: &str) -> PostingSignals {
        let text  = self.preprocessor.clean(raw_text);
        let lower = text.to_lowercase();

        let red_flags: Vec<RedFlag> = self.red_flags
            .iter()
            .filter(|(_, rx)| rx.is_match(&text))
            .map(|(flag, _)| *flag)
            .collect();

        let entry_high_exp = self.entry_level.is_match(&text)
            && self.years_exp
                .captures(&text)
                .and_then(|c| c[1].parse::<u32>().ok())
                .is_some_and(|years| years >= HIGH_EXPERIENCE_YEARS);

        let signals = PostingSignals {
            age_days:           self.age_days(&text),
            applicants:         self.applicant_count(&text),
            salary_range:       self.salary_range(&text),
            text_length:        text.chars().count(),
            red_flags,
            is_staffing:        STAFFING_AGENCIES.iter().any(|a| lower.contains(a)),
            is_repost:          self.repost.is_match(&text),
            entry_high_exp,
            for_client:         self.for_client.is_match(&text),
            has_benefits:       self.benefits.is_match(&text),
            has_manager:        self.manager.is_match(&text),
            competitive_salary: self.competitive.is_match(&text),
        };

        tracing::debug!("Extracted signals from {} chars of text", signals.text_length);
        signals
    }

    fn age_days(&self, text: &str) -> f32 {
        let scaled = [(&self.months_ago, 30.0), (&self.weeks_ago, 7.0), (&self.days_ago, 1.0)];
        for (rx, days_per_unit) in scaled {
            if let Some(n) = rx.captures(text).and_then(|c| c[1].parse::<f32>().ok()) {
                return n * days_per_unit;
            }
        }
        if self.just_posted.is_match(text) {
            0.0
        } else if self.yesterday.is_match(text) {
            1.0
        } else {
            -1.0
        }
    }

    fn applicant_count(&self, text: &str) -> f32 {
        if let Some(caps) = self.applicants.captures(text) {
            if let Ok(n) = caps[1].replacen(',', "", 1).parse::<f32>() {
                return n;
            }
        }
        if self.early_apply.is_match(text) { 5.0 } else { -1.0 }
    }

    /// Salary spread of the first plausible dollar figure.
    /// A single figure has a spread of zero; a range written
    /// high-to-low has a negative one.
    fn salary_range(&self, text: &str) -> Option<f32> {
        let caps = self.salary.captures(text)?;
        let lo: i64 = format!("{}{}", &caps[1], &caps[2]).parse().ok()?;
        if !(MIN_SALARY..=MAX_SALARY).contains(&lo) {
            return None;
        }
        let hi = match (caps.get(3), caps.get(4)) {
            (Some(a), Some(b)) => format!("{}{}", a.as_str(), b.as_str()).parse().ok()?,
            _ => lo,
        };
        Some((hi - lo) as f32)
    }
}
