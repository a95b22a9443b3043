//! Keyword-pattern ATS scoring.
//!
//! Algorithm:
//! 1. Lower-case the text once.
//! 2. Per criterion, every pattern found anywhere adds `weight / pattern_count`;
//!    the sum is capped at `weight` before it joins the total.
//! 3. A criterion whose uncapped sum is below 60% of its weight adds its suggestion.
//! 4. +5 for more than 500 characters, +5 more for more than 1000.
//! 5. Clamp to 100 and truncate.

use crate::analysis::criteria::{ScoreCriterion, CRITERIA};

const SUGGESTION_THRESHOLD: f64 = 0.6;
const LENGTH_BONUS: f64 = 5.0;
const SHORT_LENGTH_CHARS: usize = 500;
const LONG_LENGTH_CHARS: usize = 1000;
const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub score: u32, // 0 – 100
    pub suggestions: Vec<String>,
}

/// Raw contribution of one criterion before capping.
#[derive(Debug, Clone)]
pub struct CriterionScore {
    pub name: &'static str,
    pub raw: f64,
    pub weight: u32,
}

impl CriterionScore {
    pub fn capped(&self) -> f64 {
        self.raw.min(f64::from(self.weight))
    }

    pub fn needs_suggestion(&self) -> bool {
        self.raw < f64::from(self.weight) * SUGGESTION_THRESHOLD
    }
}

/// Per-criterion raw scores for `text`, in declaration order.
pub fn score_breakdown(text: &str) -> Vec<CriterionScore> {
    let lowered = text.to_lowercase();
    CRITERIA
        .iter()
        .map(|criterion| CriterionScore {
            name: criterion.name,
            raw: criterion_raw_score(criterion, &lowered),
            weight: criterion.weight,
        })
        .collect()
}

fn criterion_raw_score(criterion: &ScoreCriterion, lowered: &str) -> f64 {
    let per_pattern = f64::from(criterion.weight) / criterion.patterns.len() as f64;
    criterion
        .patterns
        .iter()
        .filter(|p| p.is_match(lowered))
        .map(|_| per_pattern)
        .sum()
}

/// Scores resume text and collects improvement suggestions.
pub fn score_resume(text: &str) -> AnalysisResult {
    let breakdown = score_breakdown(text);

    let mut score: f64 = breakdown.iter().map(CriterionScore::capped).sum();

    let suggestions = breakdown
        .iter()
        .zip(CRITERIA.iter())
        .filter(|(s, _)| s.needs_suggestion())
        .map(|(_, c)| c.suggestion.to_string())
        .collect();

    let length = text.chars().count();
    if length > SHORT_LENGTH_CHARS {
        score += LENGTH_BONUS;
    }
    if length > LONG_LENGTH_CHARS {
        score += LENGTH_BONUS;
    }

    AnalysisResult {
        score: score.min(MAX_SCORE) as u32,
        suggestions,
    }
}
