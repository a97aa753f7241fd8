use anyhow::{Context, Result};
use grader::{Grader, Report, Tier};
use ingest::Submission;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct BatchResults {
    pub submissions: Vec<GradedSubmission>,
    pub summary: BatchSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradedSubmission {
    pub id: String,
    pub source: String,
    pub ratio: f64,
    pub report: Report,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total_submissions: usize,
    pub mean_ratio: f64,
    pub median_ratio: f64,
    pub by_tier: Vec<TierCount>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TierCount {
    pub tier: Tier,
    pub count: usize,
}

/// Grade each submission in order and summarize the overall ratios.
pub fn grade_submissions(grader: &Grader, submissions: &[Submission]) -> Result<BatchResults> {
    let mut graded = Vec::with_capacity(submissions.len());

    for submission in submissions {
        let report = grader
            .grade(&submission.text)
            .context(format!("Failed to grade submission: {}", submission.source))?;

        info!(
            id = %submission.id,
            source = %submission.source,
            grade = %report.overall_grade,
            "Graded submission"
        );

        graded.push(GradedSubmission {
            id: submission.id.clone(),
            source: submission.source.clone(),
            ratio: report.ratio(),
            report,
        });
    }

    let summary = summarize(&graded);
    Ok(BatchResults {
        submissions: graded,
        summary,
    })
}

fn summarize(graded: &[GradedSubmission]) -> BatchSummary {
    let ratios: Vec<f64> = graded.iter().map(|g| g.ratio).collect();

    let (mean_ratio, median_ratio) = if ratios.is_empty() {
        (0.0, 0.0)
    } else {
        (statistical::mean(ratios.as_slice()), statistical::median(ratios.as_slice()))
    };

    let by_tier = [Tier::High, Tier::Medium, Tier::Low]
        .into_iter()
        .map(|tier| TierCount {
            tier,
            count: graded
                .iter()
                .filter(|g| g.report.overall_tier == tier)
                .count(),
        })
        .collect();

    BatchSummary {
        total_submissions: graded.len(),
        mean_ratio,
        median_ratio,
        by_tier,
    }
}
