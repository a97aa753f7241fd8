//! Turns scores and evidence into the human-readable report.

use tracing::debug;

use crate::config::GraderConfig;
use crate::error::GradeError;
use crate::rubric::{CriterionRule, CriterionSpec, FeedbackTemplate};
use crate::schema::{CriterionExplanation, DetectedElements, Evidence, Report, ScoreSet};

pub struct Explainer<'a> {
    config: &'a GraderConfig,
}

impl<'a> Explainer<'a> {
    pub fn new(config: &'a GraderConfig) -> Self {
        Self { config }
    }

    /// Explain every rubric criterion, in rubric order.
    ///
    /// Scores and evidence must cover exactly the rubric's criteria; anything
    /// else is an error rather than being dropped from the total.
    pub fn explain(
        &self,
        original_text: &str,
        scores: &ScoreSet,
        detected: &DetectedElements,
    ) -> Result<Report, GradeError> {
        let rubric = &self.config.rubric;
        if let Some(unknown) = scores
            .keys()
            .chain(detected.keys())
            .find(|c| rubric.get(*c).is_none())
        {
            return Err(GradeError::UnknownCriterion(unknown));
        }

        let mut total_score = 0.0;
        let mut explanations = Vec::with_capacity(rubric.criteria.len());

        for spec in &rubric.criteria {
            let criterion = spec.rule.criterion();
            let score = *scores
                .get(criterion)
                .ok_or(GradeError::MissingScore(criterion))?;
            let evidence = detected
                .get(criterion)
                .ok_or(GradeError::MissingEvidence(criterion))?;

            let max_score = f64::from(spec.max_score);
            if !(0.0..=max_score).contains(&score) {
                return Err(GradeError::ScoreOutOfRange {
                    criterion,
                    score,
                    max_score: spec.max_score,
                });
            }

            let tier = self.config.criterion_tiers.select(score / max_score);
            let feedback = render_feedback(spec, spec.feedback.for_tier(tier), evidence)?;

            total_score += score;
            explanations.push((
                criterion,
                CriterionExplanation {
                    name: spec.name.clone(),
                    score,
                    max_score: spec.max_score,
                    feedback,
                    tier,
                },
            ));
        }

        // Validated rubrics always have a positive total.
        let max_total_score = rubric.max_total();
        let overall_tier = self
            .config
            .overall_tiers
            .select(total_score / f64::from(max_total_score));

        debug!(
            text_len = original_text.len(),
            total_score,
            max_total_score,
            tier = ?overall_tier,
            "Generated explanations"
        );

        Ok(Report {
            overall_grade: format!("{:.1} / {}", total_score, max_total_score),
            overall_summary: self.config.summary.for_tier(overall_tier).to_string(),
            criterion_explanations: explanations.into_iter().collect(),
            total_score,
            max_total_score,
            overall_tier,
        })
    }
}

fn render_feedback(
    spec: &CriterionSpec,
    template: &FeedbackTemplate,
    evidence: &Evidence,
) -> Result<String, GradeError> {
    let criterion = spec.rule.criterion();
    let list = |items: &Vec<String>| join_or_fallback(items, template.when_empty.as_deref());

    let text = match (&spec.rule, evidence) {
        (
            CriterionRule::ThemeIdentification { .. },
            Evidence::Themes {
                identified,
                missing,
            },
        ) => template
            .text
            .replace("{themes_identified}", &list(identified))
            .replace("{themes_missing}", &list(missing)),
        (CriterionRule::AnalysisSupport { .. }, Evidence::WordCount { word_count }) => template
            .text
            .replace("{word_count}", &word_count.to_string()),
        (CriterionRule::StructureClarity { .. }, Evidence::BadPhrases { found }) => {
            template.text.replace("{issues}", &list(found))
        }
        _ => return Err(GradeError::EvidenceMismatch(criterion)),
    };

    Ok(text)
}

fn join_or_fallback(items: &[String], fallback: Option<&str>) -> String {
    if items.is_empty() {
        fallback.unwrap_or_default().to_string()
    } else {
        items.join(", ")
    }
}
