use grader::{grade, Criterion, Grader, GraderConfig, Tier};

#[test]
fn strong_themes_short_essay() {
    let report = grade(
        "Big Brother watches everyone through telescreens under the Party, and Newspeak replaces real language.",
    )
    .unwrap();

    let themes = report
        .criterion_explanations
        .get(Criterion::ThemeIdentification)
        .unwrap();
    assert_eq!(themes.score, 4.5);
    assert_eq!(themes.tier, Tier::High);
    assert_eq!(
        themes.feedback,
        "Excellent identification of key themes like Surveillance, Totalitarianism, Manipulation Of Truth."
    );

    let analysis = report
        .criterion_explanations
        .get(Criterion::AnalysisSupport)
        .unwrap();
    assert_eq!(analysis.score, 0.14);
    assert_eq!(analysis.tier, Tier::Low);
    assert!(analysis.feedback.ends_with("(Word count: 14)."));

    let structure = report
        .criterion_explanations
        .get(Criterion::StructureClarity)
        .unwrap();
    assert_eq!(structure.score, 5.0);
    assert_eq!(structure.tier, Tier::High);

    assert_eq!(report.overall_grade, "9.6 / 15");
    assert_eq!(report.overall_tier, Tier::Medium);
    assert_eq!(
        report.overall_summary,
        "Overall, your essay demonstrates a good understanding, but there are areas for improvement."
    );
}

#[test]
fn weak_essay_with_bad_phrases() {
    let report = grade("This book is confusing and badly written.").unwrap();

    let themes = report
        .criterion_explanations
        .get(Criterion::ThemeIdentification)
        .unwrap();
    assert_eq!(themes.score, 0.0);
    assert_eq!(
        themes.feedback,
        "Key themes were largely missed. Consider discussing Surveillance, Totalitarianism, Manipulation Of Truth."
    );

    let structure = report
        .criterion_explanations
        .get(Criterion::StructureClarity)
        .unwrap();
    assert_eq!(structure.score, 1.0);
    assert_eq!(structure.tier, Tier::Low);
    assert!(structure
        .feedback
        .contains("(Detected issues: badly written, confusing)"));

    assert_eq!(report.overall_grade, "1.1 / 15");
    assert_eq!(report.overall_tier, Tier::Low);
}

#[test]
fn empty_submission_is_graded_not_rejected() {
    let report = grade("").unwrap();

    assert_eq!(report.overall_grade, "5.0 / 15");
    assert_eq!(report.total_score, 5.0);
    assert_eq!(report.max_total_score, 15);
    assert_eq!(
        report.overall_summary,
        "Overall, your essay demonstrates areas needing significant improvement in understanding and writing."
    );
    assert!((report.ratio() - 5.0 / 15.0).abs() < 1e-12);
}

#[test]
fn long_essay_caps_analysis() {
    let essay = "the party watches ".repeat(400);
    let report = grade(&essay).unwrap();

    let analysis = report
        .criterion_explanations
        .get(Criterion::AnalysisSupport)
        .unwrap();
    assert_eq!(analysis.score, 5.0);
    assert_eq!(
        analysis.feedback,
        "Your analysis is strong and well-supported. The essay is comprehensive (1200 words)."
    );
}

#[test]
fn report_json_keeps_rubric_order_and_shape() {
    let report = grade("This book is confusing and badly written.").unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let object = json.as_object().unwrap();
    let mut keys: Vec<_> = object.keys().cloned().collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["criterion_explanations", "overall_grade", "overall_summary"]
    );

    let text = serde_json::to_string(&report).unwrap();
    let theme_at = text.find("\"theme_identification\"").unwrap();
    let analysis_at = text.find("\"analysis_support\"").unwrap();
    let structure_at = text.find("\"structure_clarity\"").unwrap();
    assert!(theme_at < analysis_at && analysis_at < structure_at);

    let structure = &json["criterion_explanations"]["structure_clarity"];
    assert_eq!(structure["name"], "Structure & Clarity");
    assert_eq!(structure["score"], 1.0);
    assert_eq!(structure["max_score"], 5);
}

#[test]
fn custom_rubric_order_drives_report_order() {
    let mut config = GraderConfig::default();
    config.rubric.criteria.reverse();
    let grader = Grader::new(config).unwrap();

    let report = grader.grade("Big Brother").unwrap();
    assert_eq!(
        report.criterion_explanations.keys().collect::<Vec<_>>(),
        vec![
            Criterion::StructureClarity,
            Criterion::AnalysisSupport,
            Criterion::ThemeIdentification,
        ]
    );
}

#[test]
fn subset_rubric_totals_only_its_criteria() {
    let mut config = GraderConfig::default();
    config
        .rubric
        .criteria
        .retain(|c| c.rule.criterion() == Criterion::StructureClarity);
    let grader = Grader::new(config).unwrap();

    let report = grader.grade("confusing").unwrap();
    assert_eq!(report.criterion_explanations.len(), 1);
    assert_eq!(report.overall_grade, "3.0 / 5");
}

#[test]
fn grader_rejects_invalid_config() {
    let mut config = GraderConfig::default();
    config.rubric.criteria.clear();
    assert!(Grader::new(config).is_err());
}

#[test]
fn concurrent_grading_is_independent() {
    let grader = Grader::default();
    let texts = [
        "Big Brother and the Party",
        "This book is confusing and badly written.",
        "",
    ];
    let expected: Vec<_> = texts.iter().map(|t| grader.grade(t).unwrap()).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let grader = &grader;
                let text = texts[i % texts.len()];
                scope.spawn(move || grader.grade(text).unwrap())
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), expected[i % texts.len()]);
        }
    });
}

#[test]
fn separator_controls_keep_keywords_apart() {
    let report = grade("big\x1fbrother").unwrap();

    let themes = report
        .criterion_explanations
        .get(Criterion::ThemeIdentification)
        .unwrap();
    assert_eq!(themes.score, 1.5);
    assert!(themes.feedback.contains("Totalitarianism"));
    assert!(!themes.feedback.contains("Surveillance"));
    assert_eq!(report.overall_grade, "6.5 / 15");
}
