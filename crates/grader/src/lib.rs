pub mod config;
pub mod error;
pub mod explain;
pub mod features;
pub mod rubric;
pub mod schema;
pub mod scoring;

pub use config::{GraderConfig, SummaryTemplates, TierThresholds};
pub use error::{ConfigError, GradeError};
pub use explain::Explainer;
pub use features::{extract_features, normalize, Features};
pub use rubric::{CriterionRule, CriterionSpec, FeedbackTemplate, FeedbackTemplates, Rubric, ThemeGroup};
pub use schema::{
    Criterion, CriterionExplanation, CriterionMap, DetectedElements, Evidence, GradingResult,
    Report, ScoreSet, Tier,
};
pub use scoring::GradingModel;

use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static DEFAULT_GRADER: LazyLock<Grader> = LazyLock::new(Grader::default);

/// Runs extract -> score -> explain against one validated config.
///
/// Holds no per-call state, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Grader {
    config: GraderConfig,
}

impl Grader {
    pub fn new(config: GraderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = GraderConfig::load(path)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GraderConfig {
        &self.config
    }

    pub fn rubric(&self) -> &Rubric {
        &self.config.rubric
    }

    pub fn grade(&self, text: &str) -> Result<Report, GradeError> {
        let features = extract_features(text);
        debug!(word_count = features.word_count, "Extracted features");

        let result = GradingModel::new(&self.config.rubric).grade(&features);

        Explainer::new(&self.config).explain(
            &features.original_text,
            &result.scores,
            &result.detected,
        )
    }
}

impl Default for Grader {
    /// The built-in rubric, which is covered by `builtin_config_is_valid`.
    fn default() -> Self {
        Self {
            config: GraderConfig::default(),
        }
    }
}

/// Grade `text` with the built-in rubric.
pub fn grade(text: &str) -> Result<Report, GradeError> {
    DEFAULT_GRADER.grade(text)
}
