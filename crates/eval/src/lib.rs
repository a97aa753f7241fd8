pub mod batch;
pub mod display;
pub mod samples;

pub use batch::{grade_submissions, BatchResults, BatchSummary, GradedSubmission};
pub use display::{render_report, ReportView};
pub use samples::{sample_essays, SampleEssay};

use ingest::Submission;

/// The built-in samples as submissions, keyed by their titles.
pub fn sample_submissions() -> Vec<Submission> {
    sample_essays()
        .into_iter()
        .map(|sample| Submission::new(sample.title, sample.text))
        .collect()
}
