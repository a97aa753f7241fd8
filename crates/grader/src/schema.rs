use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A rubric dimension. Keys are the snake_case names used in reports and config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    ThemeIdentification,
    AnalysisSupport,
    StructureClarity,
}

impl Criterion {
    pub const ALL: [Criterion; 3] = [
        Criterion::ThemeIdentification,
        Criterion::AnalysisSupport,
        Criterion::StructureClarity,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Criterion::ThemeIdentification => "theme_identification",
            Criterion::AnalysisSupport => "analysis_support",
            Criterion::StructureClarity => "structure_clarity",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

/// Criterion-keyed values kept in rubric order.
///
/// Serializes as a JSON object so the report keeps the `{ "<key>": ... }` shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionMap<T> {
    entries: Vec<(Criterion, T)>,
}

impl<T> CriterionMap<T> {
    pub fn get(&self, criterion: Criterion) -> Option<&T> {
        self.entries
            .iter()
            .find(|(c, _)| *c == criterion)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, &T)> {
        self.entries.iter().map(|(c, v)| (*c, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = Criterion> + '_ {
        self.entries.iter().map(|(c, _)| *c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for CriterionMap<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> FromIterator<(Criterion, T)> for CriterionMap<T> {
    /// A repeated criterion replaces the earlier value but keeps its position.
    fn from_iter<I: IntoIterator<Item = (Criterion, T)>>(iter: I) -> Self {
        let mut entries: Vec<(Criterion, T)> = Vec::new();
        for (criterion, value) in iter {
            match entries.iter_mut().find(|(c, _)| *c == criterion) {
                Some(slot) => slot.1 = value,
                None => entries.push((criterion, value)),
            }
        }
        Self { entries }
    }
}

impl<T: Serialize> Serialize for CriterionMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (criterion, value) in &self.entries {
            map.serialize_entry(criterion.key(), value)?;
        }
        map.end()
    }
}

/// Per-criterion scores in `[0, max_score]`.
pub type ScoreSet = CriterionMap<f64>;

/// Per-criterion evidence used to fill feedback templates.
pub type DetectedElements = CriterionMap<Evidence>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    Themes {
        identified: Vec<String>,
        missing: Vec<String>,
    },
    WordCount {
        word_count: usize,
    },
    BadPhrases {
        found: Vec<String>,
    },
}

/// Output of the scoring stage.
#[derive(Debug, Clone, PartialEq)]
pub struct GradingResult {
    pub scores: ScoreSet,
    pub detected: DetectedElements,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionExplanation {
    pub name: String,
    pub score: f64,
    pub max_score: u32,
    pub feedback: String,
    #[serde(skip)]
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// `"<total:.1> / <max_total>"`
    pub overall_grade: String,
    pub overall_summary: String,
    pub criterion_explanations: CriterionMap<CriterionExplanation>,
    #[serde(skip)]
    pub total_score: f64,
    #[serde(skip)]
    pub max_total_score: u32,
    #[serde(skip)]
    pub overall_tier: Tier,
}

impl Report {
    /// Fraction of the available points achieved.
    pub fn ratio(&self) -> f64 {
        self.total_score / f64::from(self.max_total_score)
    }
}
