use anyhow::{Context, Result};
use clap::Parser;
use eval::{grade_submissions, sample_submissions, BatchResults, ReportView};
use grader::Grader;
use std::path::PathBuf;

/// Grade essays against a rubric and explain every score
#[derive(Parser, Debug)]
#[command(name = "grade")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Rubric and threshold config (JSON); the built-in rubric when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print reports as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Write batch results (reports and summary) to this file
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Essay files (.txt/.md) or directories; the built-in samples when empty
    paths: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so reports on stdout stay clean
    if cli.log_json {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    }

    let grader = match &cli.config {
        Some(path) => Grader::load(path)
            .context(format!("Failed to load grader config: {:?}", path))?,
        None => Grader::default(),
    };

    let submissions = if cli.paths.is_empty() {
        sample_submissions()
    } else {
        let mut all = Vec::new();
        for path in &cli.paths {
            all.extend(ingest::load_path(path).await?);
        }
        all
    };
    tracing::info!(count = submissions.len(), "Grading submissions");

    let results = grade_submissions(&grader, &submissions)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
    }

    if let Some(output) = &cli.output {
        let json = serde_json::to_string_pretty(&results)?;
        tokio::fs::write(output, json)
            .await
            .context(format!("Failed to write results: {:?}", output))?;
        tracing::info!(path = %output.display(), "Results saved");
    }

    Ok(())
}

fn print_results(results: &BatchResults) {
    for (i, graded) in results.submissions.iter().enumerate() {
        if i > 0 {
            println!("\n{}\n", "=".repeat(50));
        }
        println!("Grading {}:", graded.source);
        print!("{}", ReportView(&graded.report));
    }

    let summary = &results.summary;
    if summary.total_submissions > 1 {
        println!("\n=== SUMMARY ===\n");
        println!("  Submissions: {}", summary.total_submissions);
        println!("  Mean Score: {:.1}%", summary.mean_ratio * 100.0);
        println!("  Median Score: {:.1}%", summary.median_ratio * 100.0);
        for tier in &summary.by_tier {
            println!("  {:?}: {}", tier.tier, tier.count);
        }
    }
}
