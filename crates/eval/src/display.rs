use grader::Report;
use std::fmt;

/// Plain-text layout of a report for terminal output.
pub struct ReportView<'a>(pub &'a Report);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "\n--- Transparent Grade Report ---")?;
        writeln!(f, "Overall Grade: {}", report.overall_grade)?;
        writeln!(f, "Summary: {}", report.overall_summary)?;
        writeln!(f, "\nDetailed Feedback:")?;

        for (_, explanation) in report.criterion_explanations.iter() {
            writeln!(
                f,
                "\nCriterion: {} ({:.1}/{})",
                explanation.name, explanation.score, explanation.max_score
            )?;
            writeln!(f, "  Feedback: {}", explanation.feedback)?;
        }

        writeln!(f, "\n--- Grading Process Complete ---")
    }
}

pub fn render_report(report: &Report) -> String {
    ReportView(report).to_string()
}
