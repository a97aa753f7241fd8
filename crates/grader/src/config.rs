use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

use crate::error::ConfigError;
use crate::rubric::Rubric;
use crate::schema::Tier;

static BUILTIN: LazyLock<GraderConfig> = LazyLock::new(|| GraderConfig {
    rubric: Rubric::builtin(),
    criterion_tiers: TierThresholds::criterion_default(),
    overall_tiers: TierThresholds::overall_default(),
    summary: SummaryTemplates::default(),
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraderConfig {
    pub rubric: Rubric,
    #[serde(default = "TierThresholds::criterion_default")]
    pub criterion_tiers: TierThresholds,
    #[serde(default = "TierThresholds::overall_default")]
    pub overall_tiers: TierThresholds,
    #[serde(default)]
    pub summary: SummaryTemplates,
}

/// Ratio thresholds; each bound is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub high: f64,
    pub medium: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTemplates {
    pub high: String,
    pub medium: String,
    pub low: String,
}

impl TierThresholds {
    pub fn criterion_default() -> Self {
        Self {
            high: 0.8,
            medium: 0.4,
        }
    }

    pub fn overall_default() -> Self {
        Self {
            high: 0.8,
            medium: 0.5,
        }
    }

    pub fn select(&self, ratio: f64) -> Tier {
        if ratio >= self.high {
            Tier::High
        } else if ratio >= self.medium {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        let ordered = 0.0 <= self.medium && self.medium <= self.high && self.high <= 1.0;
        if !ordered {
            return Err(ConfigError::InvalidThresholds {
                name,
                high: self.high,
                medium: self.medium,
            });
        }
        Ok(())
    }
}

impl Default for SummaryTemplates {
    fn default() -> Self {
        Self {
            high: "Overall, your essay demonstrates an excellent understanding and strong writing skills."
                .to_string(),
            medium: "Overall, your essay demonstrates a good understanding, but there are areas for improvement."
                .to_string(),
            low: "Overall, your essay demonstrates areas needing significant improvement in understanding and writing."
                .to_string(),
        }
    }
}

impl SummaryTemplates {
    pub fn for_tier(&self, tier: Tier) -> &str {
        match tier {
            Tier::High => &self.high,
            Tier::Medium => &self.medium,
            Tier::Low => &self.low,
        }
    }
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl GraderConfig {
    /// Built-in rubric and thresholds, initialized once per process.
    pub fn builtin() -> &'static GraderConfig {
        &BUILTIN
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GraderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rubric.validate()?;
        self.criterion_tiers.validate("criterion")?;
        self.overall_tiers.validate("overall")?;
        Ok(())
    }
}
