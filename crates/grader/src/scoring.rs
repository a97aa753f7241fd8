use tracing::debug;

use crate::features::Features;
use crate::rubric::{CriterionRule, Rubric, ThemeGroup};
use crate::schema::{Evidence, GradingResult};

/// Maps extracted features to per-criterion scores using the rubric's fixed rules.
pub struct GradingModel<'a> {
    rubric: &'a Rubric,
}

impl<'a> GradingModel<'a> {
    pub fn new(rubric: &'a Rubric) -> Self {
        Self { rubric }
    }

    pub fn grade(&self, features: &Features) -> GradingResult {
        let mut scores = Vec::with_capacity(self.rubric.criteria.len());
        let mut detected = Vec::with_capacity(self.rubric.criteria.len());

        for spec in &self.rubric.criteria {
            let max_score = f64::from(spec.max_score);
            let (score, evidence) = match &spec.rule {
                CriterionRule::ThemeIdentification { increment, themes } => {
                    score_themes(&features.normalized_text, themes, *increment, max_score)
                }
                CriterionRule::AnalysisSupport { words_per_point } => {
                    score_analysis(features.word_count, *words_per_point, max_score)
                }
                CriterionRule::StructureClarity {
                    penalty,
                    bad_phrases,
                } => score_structure(&features.normalized_text, bad_phrases, *penalty, max_score),
            };

            let criterion = spec.rule.criterion();
            debug!(criterion = %criterion, score, max_score, "Scored criterion");
            scores.push((criterion, score));
            detected.push((criterion, evidence));
        }

        GradingResult {
            scores: scores.into_iter().collect(),
            detected: detected.into_iter().collect(),
        }
    }
}

/// A group counts once if any of its keywords occurs as a substring.
pub fn score_themes(
    normalized: &str,
    themes: &[ThemeGroup],
    increment: f64,
    max_score: f64,
) -> (f64, Evidence) {
    let mut score = 0.0;
    let mut identified = Vec::new();
    let mut missing = Vec::new();

    for group in themes {
        let found = group
            .keywords
            .iter()
            .any(|keyword| normalized.contains(keyword.as_str()));
        if found {
            score += increment;
            identified.push(group.label());
        } else {
            missing.push(group.label());
        }
    }

    (score.min(max_score), Evidence::Themes { identified, missing })
}

pub fn score_analysis(word_count: usize, words_per_point: f64, max_score: f64) -> (f64, Evidence) {
    let score = (word_count as f64 / words_per_point).min(max_score);
    (score, Evidence::WordCount { word_count })
}

pub fn score_structure(
    normalized: &str,
    bad_phrases: &[String],
    penalty: f64,
    max_score: f64,
) -> (f64, Evidence) {
    let found: Vec<String> = bad_phrases
        .iter()
        .filter(|phrase| normalized.contains(phrase.as_str()))
        .cloned()
        .collect();

    let score = (max_score - penalty * found.len() as f64).max(0.0);
    (score, Evidence::BadPhrases { found })
}
