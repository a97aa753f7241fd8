//! Error types for the grading pipeline

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::Criterion;

/// Rubric or threshold configuration that must not be used.
///
/// These are startup failures: a grader is never built from an invalid config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rubric has no criteria")]
    EmptyRubric,

    #[error("Criterion {0} has a maximum score of zero")]
    ZeroMaxScore(Criterion),

    #[error("Criterion {0} is listed more than once")]
    DuplicateCriterion(Criterion),

    #[error("Theme identification rule has no theme groups")]
    NoThemes,

    #[error("Theme group '{0}' has no keywords")]
    EmptyKeywordGroup(String),

    #[error("Invalid rule for {criterion}: {reason}")]
    InvalidRule { criterion: Criterion, reason: String },

    #[error("Invalid {name} tier thresholds: high={high}, medium={medium}")]
    InvalidThresholds {
        name: &'static str,
        high: f64,
        medium: f64,
    },
}

/// Scores or evidence that do not line up with the rubric.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradeError {
    #[error("Criterion {0} is not in the rubric")]
    UnknownCriterion(Criterion),

    #[error("No score for rubric criterion {0}")]
    MissingScore(Criterion),

    #[error("No evidence for rubric criterion {0}")]
    MissingEvidence(Criterion),

    #[error("Evidence for criterion {0} does not match its rule")]
    EvidenceMismatch(Criterion),

    #[error("Score {score} for criterion {criterion} is outside [0, {max_score}]")]
    ScoreOutOfRange {
        criterion: Criterion,
        score: f64,
        max_score: u32,
    },
}
