//! Rubric definition: criteria, detection rules and feedback templates
//!
//! Each criterion carries the data for its own rule, so a rubric entry can only
//! be scored and explained the way its variant says.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

use crate::error::ConfigError;
use crate::features::normalize;
use crate::schema::{Criterion, Tier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    pub criteria: Vec<CriterionSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSpec {
    pub name: String,
    pub max_score: u32,
    #[serde(flatten)]
    pub rule: CriterionRule,
    pub feedback: FeedbackTemplates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "criterion", rename_all = "snake_case")]
pub enum CriterionRule {
    /// `increment` points per theme group with at least one keyword present
    ThemeIdentification {
        increment: f64,
        themes: Vec<ThemeGroup>,
    },
    /// One point per `words_per_point` words
    AnalysisSupport { words_per_point: f64 },
    /// `penalty` points off per bad phrase present
    StructureClarity {
        penalty: f64,
        bad_phrases: Vec<String>,
    },
}

impl CriterionRule {
    pub fn criterion(&self) -> Criterion {
        match self {
            CriterionRule::ThemeIdentification { .. } => Criterion::ThemeIdentification,
            CriterionRule::AnalysisSupport { .. } => Criterion::AnalysisSupport,
            CriterionRule::StructureClarity { .. } => Criterion::StructureClarity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeGroup {
    pub key: String,
    pub keywords: Vec<String>,
}

impl ThemeGroup {
    /// `manipulation_of_truth` -> `Manipulation Of Truth`
    pub fn label(&self) -> String {
        self.key
            .split('_')
            .map(title_case)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackTemplates {
    pub high: FeedbackTemplate,
    pub medium: FeedbackTemplate,
    pub low: FeedbackTemplate,
}

impl FeedbackTemplates {
    pub fn for_tier(&self, tier: Tier) -> &FeedbackTemplate {
        match tier {
            Tier::High => &self.high,
            Tier::Medium => &self.medium,
            Tier::Low => &self.low,
        }
    }
}

/// Feedback text with `{placeholder}` slots.
///
/// `when_empty` replaces a list placeholder whose list is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackTemplate {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when_empty: Option<String>,
}

impl FeedbackTemplate {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            when_empty: None,
        }
    }

    pub fn with_fallback(text: &str, when_empty: &str) -> Self {
        Self {
            text: text.to_string(),
            when_empty: Some(when_empty.to_string()),
        }
    }
}

impl Rubric {
    pub fn get(&self, criterion: Criterion) -> Option<&CriterionSpec> {
        self.criteria
            .iter()
            .find(|spec| spec.rule.criterion() == criterion)
    }

    pub fn max_total(&self) -> u32 {
        self.criteria.iter().map(|spec| spec.max_score).sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.criteria.is_empty() {
            return Err(ConfigError::EmptyRubric);
        }

        let mut seen = HashSet::new();
        for spec in &self.criteria {
            let criterion = spec.rule.criterion();
            if !seen.insert(criterion) {
                return Err(ConfigError::DuplicateCriterion(criterion));
            }
            if spec.max_score == 0 {
                return Err(ConfigError::ZeroMaxScore(criterion));
            }
            spec.rule.validate()?;
        }

        Ok(())
    }

    /// The built-in rubric for essays on Orwell's *1984*.
    pub fn builtin() -> Self {
        Self {
            criteria: vec![
                CriterionSpec {
                    name: "Theme Identification".to_string(),
                    max_score: 5,
                    rule: CriterionRule::ThemeIdentification {
                        increment: 1.5,
                        themes: vec![
                            theme("surveillance", &["big brother", "thought police", "telescreen"]),
                            theme(
                                "totalitarianism",
                                &["party", "oceania", "ministry of truth", "doublethink"],
                            ),
                            theme("manipulation_of_truth", &["newspeak", "memory hole", "2+2=5"]),
                        ],
                    },
                    feedback: FeedbackTemplates {
                        high: FeedbackTemplate::with_fallback(
                            "Excellent identification of key themes like {themes_identified}.",
                            "various themes",
                        ),
                        medium: FeedbackTemplate::with_fallback(
                            "You identified some themes, but could elaborate more on {themes_missing}.",
                            "some specific themes",
                        ),
                        low: FeedbackTemplate::with_fallback(
                            "Key themes were largely missed. Consider discussing {themes_missing}.",
                            "key themes",
                        ),
                    },
                },
                CriterionSpec {
                    name: "Analysis & Support".to_string(),
                    max_score: 5,
                    rule: CriterionRule::AnalysisSupport {
                        words_per_point: 100.0,
                    },
                    feedback: FeedbackTemplates {
                        high: FeedbackTemplate::new(
                            "Your analysis is strong and well-supported. The essay is comprehensive ({word_count} words).",
                        ),
                        medium: FeedbackTemplate::new(
                            "Your analysis shows potential, but could benefit from more in-depth textual evidence. Consider expanding on your points. (Word count: {word_count}).",
                        ),
                        low: FeedbackTemplate::new(
                            "The essay lacks sufficient analysis and textual support. Ensure you are directly referencing the text to back up your claims. (Word count: {word_count}).",
                        ),
                    },
                },
                CriterionSpec {
                    name: "Structure & Clarity".to_string(),
                    max_score: 5,
                    rule: CriterionRule::StructureClarity {
                        penalty: 2.0,
                        bad_phrases: vec!["badly written".to_string(), "confusing".to_string()],
                    },
                    feedback: FeedbackTemplates {
                        high: FeedbackTemplate::new(
                            "Your essay is well-structured, clear, and easy to read. Grammar and spelling are excellent.",
                        ),
                        medium: FeedbackTemplate::with_fallback(
                            "The structure is generally clear, but there are some areas for improvement in clarity or grammar. (Detected issues: {issues}).",
                            "none specific",
                        ),
                        low: FeedbackTemplate::with_fallback(
                            "The essay's structure and clarity need significant improvement. Focus on paragraph organization, sentence structure, and proofreading. (Detected issues: {issues}).",
                            "none specific",
                        ),
                    },
                },
            ],
        }
    }
}

fn theme(key: &str, keywords: &[&str]) -> ThemeGroup {
    ThemeGroup {
        key: key.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

impl CriterionRule {
    fn validate(&self) -> Result<(), ConfigError> {
        let criterion = self.criterion();
        let invalid = |reason: &str| ConfigError::InvalidRule {
            criterion,
            reason: reason.to_string(),
        };

        match self {
            CriterionRule::ThemeIdentification { increment, themes } => {
                if !(increment.is_finite() && *increment > 0.0) {
                    return Err(invalid("increment must be a positive number"));
                }
                if themes.is_empty() {
                    return Err(ConfigError::NoThemes);
                }
                for group in themes {
                    if group.keywords.is_empty() {
                        return Err(ConfigError::EmptyKeywordGroup(group.key.clone()));
                    }
                    for keyword in &group.keywords {
                        warn_if_unmatchable(criterion, keyword);
                    }
                }
            }
            CriterionRule::AnalysisSupport { words_per_point } => {
                if !(words_per_point.is_finite() && *words_per_point > 0.0) {
                    return Err(invalid("words_per_point must be a positive number"));
                }
            }
            CriterionRule::StructureClarity {
                penalty,
                bad_phrases,
            } => {
                if !(penalty.is_finite() && *penalty >= 0.0) {
                    return Err(invalid("penalty must be zero or a positive number"));
                }
                for phrase in bad_phrases {
                    warn_if_unmatchable(criterion, phrase);
                }
            }
        }

        Ok(())
    }
}

/// Matching runs against normalized text, so a phrase that changes under
/// normalization can never be found. It is kept as written.
fn warn_if_unmatchable(criterion: Criterion, phrase: &str) {
    if normalize(phrase) != phrase {
        warn!(
            criterion = %criterion,
            phrase = phrase,
            "Phrase can never match normalized text"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rubric_is_valid() {
        let rubric = Rubric::builtin();
        rubric.validate().unwrap();
        assert_eq!(rubric.max_total(), 15);
        assert_eq!(
            rubric
                .criteria
                .iter()
                .map(|c| c.rule.criterion())
                .collect::<Vec<_>>(),
            Criterion::ALL.to_vec()
        );
    }

    #[test]
    fn theme_labels_are_title_cased() {
        let group = theme("manipulation_of_truth", &["newspeak"]);
        assert_eq!(group.label(), "Manipulation Of Truth");
        assert_eq!(theme("surveillance", &["x"]).label(), "Surveillance");
    }

    #[test]
    fn empty_rubric_is_rejected() {
        let rubric = Rubric { criteria: vec![] };
        assert!(matches!(rubric.validate(), Err(ConfigError::EmptyRubric)));
    }

    #[test]
    fn zero_max_score_is_rejected() {
        let mut rubric = Rubric::builtin();
        rubric.criteria[1].max_score = 0;
        assert!(matches!(
            rubric.validate(),
            Err(ConfigError::ZeroMaxScore(Criterion::AnalysisSupport))
        ));
    }

    #[test]
    fn duplicate_criterion_is_rejected() {
        let mut rubric = Rubric::builtin();
        let copy = rubric.criteria[2].clone();
        rubric.criteria.push(copy);
        assert!(matches!(
            rubric.validate(),
            Err(ConfigError::DuplicateCriterion(Criterion::StructureClarity))
        ));
    }

    #[test]
    fn empty_theme_groups_are_rejected() {
        let mut rubric = Rubric::builtin();
        if let CriterionRule::ThemeIdentification { themes, .. } = &mut rubric.criteria[0].rule {
            themes[1].keywords.clear();
        }
        assert!(matches!(
            rubric.validate(),
            Err(ConfigError::EmptyKeywordGroup(key)) if key == "totalitarianism"
        ));

        if let CriterionRule::ThemeIdentification { themes, .. } = &mut rubric.criteria[0].rule {
            themes.clear();
        }
        assert!(matches!(rubric.validate(), Err(ConfigError::NoThemes)));
    }

    #[test]
    fn non_positive_rule_parameters_are_rejected() {
        let mut rubric = Rubric::builtin();
        rubric.criteria[1].rule = CriterionRule::AnalysisSupport {
            words_per_point: 0.0,
        };
        assert!(matches!(
            rubric.validate(),
            Err(ConfigError::InvalidRule {
                criterion: Criterion::AnalysisSupport,
                ..
            })
        ));

        let mut rubric = Rubric::builtin();
        rubric.criteria[2].rule = CriterionRule::StructureClarity {
            penalty: f64::NAN,
            bad_phrases: vec![],
        };
        assert!(matches!(
            rubric.validate(),
            Err(ConfigError::InvalidRule {
                criterion: Criterion::StructureClarity,
                ..
            })
        ));
    }

    #[test]
    fn rubric_round_trips_through_json() {
        let rubric = Rubric::builtin();
        let json = serde_json::to_string_pretty(&rubric).unwrap();
        assert!(json.contains("\"criterion\": \"theme_identification\""));
        let back: Rubric = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rubric);
    }

    #[test]
    fn unknown_criterion_in_json_fails_to_parse() {
        let json = r#"{
            "criteria": [{
                "criterion": "spelling",
                "name": "Spelling",
                "max_score": 5,
                "feedback": {
                    "high": {"text": "a"},
                    "medium": {"text": "b"},
                    "low": {"text": "c"}
                }
            }]
        }"#;
        assert!(serde_json::from_str::<Rubric>(json).is_err());
    }
}
