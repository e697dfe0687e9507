//! Integration tests for the cleaning pipeline.
//!
//! These tests verify end-to-end behavior over an in-memory table shaped
//! like the air-quality dataset: numeric columns with missing values, an
//! obvious outlier row, and passenger columns that are carried through.

use aq_clean::{
    CleaningConfig, CleaningError, CleaningStage, OutlierFilter, Pipeline, ReportGenerator,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

// ============================================================================
// Helper Functions
// ============================================================================

/// A small table in the shape of the airquality dataset: `Ozone` and `Wind`
/// carry missing values and one extreme outlier, `Temp` and `Day` ride along.
fn airquality_like() -> DataFrame {
    df![
        "Ozone" => [Some(41.0), Some(36.0), Some(12.0), Some(18.0), None, Some(28.0), Some(23.0), Some(19.0), Some(8.0), None, Some(7.0), Some(16.0), Some(11.0), Some(14.0), Some(320.0), Some(30.0)],
        "Wind" => [Some(7.4), Some(8.0), Some(12.6), Some(11.5), Some(14.3), None, Some(8.6), Some(13.8), Some(20.1), Some(8.6), Some(6.9), Some(9.7), Some(9.2), Some(10.9), Some(13.2), Some(11.5)],
        "Temp" => [67i64, 72, 74, 62, 56, 66, 65, 59, 61, 69, 74, 69, 66, 68, 58, 64],
        "Day" => [1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16],
    ]
    .unwrap()
}

fn no_plots_config(columns: &[&str]) -> CleaningConfig {
    CleaningConfig::builder()
        .columns(columns.iter().copied())
        .render_plots(false)
        .build()
        .unwrap()
}

fn run_pipeline(df: DataFrame, columns: &[&str]) -> aq_clean::PipelineOutcome {
    Pipeline::builder()
        .config(no_plots_config(columns))
        .build()
        .unwrap()
        .process(df)
        .expect("pipeline should complete")
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_full_pipeline_imputes_all_configured_columns() {
    let df = airquality_like();
    let outcome = run_pipeline(df, &["Ozone", "Wind"]);

    assert_eq!(outcome.cleaned.column("Ozone").unwrap().null_count(), 0);
    assert_eq!(outcome.cleaned.column("Wind").unwrap().null_count(), 0);

    // Two imputations recorded, one per configured column
    assert_eq!(outcome.summary.imputations.len(), 2);
    assert_eq!(outcome.summary.imputations[0].column, "Ozone");
    assert_eq!(outcome.summary.imputations[0].values_filled, 2);
}

#[test]
fn test_full_pipeline_removes_outlier_rows() {
    let df = airquality_like();
    let rows_before = df.height();
    let outcome = run_pipeline(df, &["Ozone", "Wind"]);

    // The Ozone = 320 row cannot survive the cascade
    let max_ozone = outcome
        .cleaned
        .column("Ozone")
        .unwrap()
        .f64()
        .unwrap()
        .max()
        .unwrap();
    assert!(max_ozone < 320.0);

    assert_eq!(outcome.summary.rows_before, rows_before);
    assert_eq!(
        outcome.summary.rows_after,
        rows_before - outcome.summary.rows_removed
    );

    // Row counts are monotonically non-increasing across the cascade
    let mut current = rows_before;
    for step in &outcome.summary.filter_steps {
        assert_eq!(step.rows_before, current);
        assert!(step.rows_removed <= current);
        current -= step.rows_removed;
    }
    assert_eq!(current, outcome.summary.rows_after);
}

#[test]
fn test_full_pipeline_retained_rows_satisfy_final_bounds() {
    let df = airquality_like();
    let outcome = run_pipeline(df, &["Ozone", "Wind"]);

    // Re-filtering the cleaned table with the same bounds removes nothing
    let mut steps = Vec::new();
    for column in ["Ozone", "Wind"] {
        let (refiltered, step) =
            OutlierFilter::filter_column(&outcome.cleaned, column, 1.5, &mut steps).unwrap();
        assert_eq!(step.rows_removed, 0);
        assert_eq!(refiltered.height(), outcome.cleaned.height());
    }
}

#[test]
fn test_full_pipeline_normalization_bounds() {
    let df = airquality_like();
    let outcome = run_pipeline(df, &["Ozone", "Wind"]);

    for col in outcome.normalized.get_columns() {
        let values = col.f64().unwrap();
        assert_eq!(values.min().unwrap(), 0.0);
        assert_eq!(values.max().unwrap(), 1.0);
    }

    // Normalization did not touch the cleaned table
    let temp_max = outcome
        .cleaned
        .column("Temp")
        .unwrap()
        .i64()
        .unwrap()
        .max()
        .unwrap();
    assert!(temp_max > 1);
}

#[test]
fn test_full_pipeline_passes_through_extra_columns() {
    let df = airquality_like();
    let outcome = run_pipeline(df, &["Ozone", "Wind"]);

    let names: Vec<String> = outcome
        .cleaned
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(names, vec!["Ozone", "Wind", "Temp", "Day"]);
}

#[test]
fn test_full_pipeline_t_test_output() {
    let df = airquality_like();
    let outcome = run_pipeline(df, &["Ozone", "Wind"]);

    assert!(outcome.t_test.p_value >= 0.0 && outcome.t_test.p_value <= 1.0);
    assert!(outcome.t_test.statistic.is_finite());
    // df = (original non-missing Ozone) + (cleaned rows) - 2
    let n_original = 14.0;
    let n_cleaned = outcome.cleaned.height() as f64;
    assert_eq!(outcome.t_test.df, n_original + n_cleaned - 2.0);
}

#[test]
fn test_full_pipeline_summaries_cover_numeric_columns() {
    let df = airquality_like();
    let outcome = run_pipeline(df, &["Ozone", "Wind"]);

    let names: Vec<&str> = outcome
        .column_summaries
        .iter()
        .map(|s| s.column.as_str())
        .collect();
    assert_eq!(names, vec!["Ozone", "Wind", "Temp", "Day"]);

    for summary in &outcome.column_summaries {
        assert_eq!(summary.count, outcome.cleaned.height());
        assert!(summary.min <= summary.q1);
        assert!(summary.q1 <= summary.median);
        assert!(summary.median <= summary.q3);
        assert!(summary.q3 <= summary.max);
    }
}

#[test]
fn test_pipeline_progress_sequence() {
    let stages: Arc<Mutex<Vec<CleaningStage>>> = Arc::new(Mutex::new(Vec::new()));
    let stages_clone = Arc::clone(&stages);

    Pipeline::builder()
        .config(no_plots_config(&["Ozone", "Wind"]))
        .on_progress(move |update| {
            stages_clone.lock().unwrap().push(update.stage);
        })
        .build()
        .unwrap()
        .process(airquality_like())
        .unwrap();

    let stages = stages.lock().unwrap();
    assert_eq!(stages.first(), Some(&CleaningStage::Initializing));
    assert_eq!(stages.last(), Some(&CleaningStage::Complete));
    // No Rendering stage when plots are disabled
    assert!(!stages.contains(&CleaningStage::Rendering));
}

// ============================================================================
// Edge Case Tests
// ============================================================================

#[test]
fn test_pipeline_no_missing_values() {
    let df = df![
        "Ozone" => [10.0, 12.0, 11.0, 13.0, 14.0, 12.5, 11.5, 13.5],
        "Temp" => [60.0, 61.0, 62.0, 63.0, 64.0, 65.0, 66.0, 67.0],
    ]
    .unwrap();

    let outcome = run_pipeline(df, &["Ozone"]);

    // Nothing to fill, nothing to remove
    assert_eq!(outcome.summary.imputations[0].values_filled, 0);
    assert_eq!(outcome.summary.rows_removed, 0);
}

#[test]
fn test_pipeline_all_missing_column_is_fatal() {
    let df = df![
        "Ozone" => [Option::<f64>::None, None, None, None],
        "Temp" => [60.0, 61.0, 62.0, 63.0],
    ]
    .unwrap();

    let result = Pipeline::builder()
        .config(no_plots_config(&["Ozone"]))
        .build()
        .unwrap()
        .process(df);

    assert!(result.is_err());
}

#[test]
fn test_pipeline_constant_column_is_fatal_in_normalization() {
    let df = df![
        "Ozone" => [10.0, 12.0, 11.0, 13.0, 14.0, 12.5],
        "Constant" => [5.0, 5.0, 5.0, 5.0, 5.0, 5.0],
    ]
    .unwrap();

    let result = Pipeline::builder()
        .config(no_plots_config(&["Ozone"]))
        .build()
        .unwrap()
        .process(df);

    match result {
        Err(CleaningError::ConstantColumn(column)) => assert_eq!(column, "Constant"),
        other => panic!("expected ConstantColumn error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_pipeline_missing_configured_column_is_fatal() {
    let df = df![
        "Temp" => [60.0, 61.0, 62.0],
    ]
    .unwrap();

    let result = Pipeline::builder()
        .config(no_plots_config(&["Ozone"]))
        .build()
        .unwrap()
        .process(df);

    assert!(result.is_err());
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_report_round_trip() {
    let df = airquality_like();
    let outcome = run_pipeline(df, &["Ozone", "Wind"]);

    let generator = ReportGenerator::default();
    let report = generator.build_report("airquality.csv", &outcome);

    assert_eq!(report.input_file, "airquality.csv");
    assert_eq!(report.summary.rows_before, 16);
    assert_eq!(report.column_summaries.len(), 4);

    let json = serde_json::to_string(&report).unwrap();
    let parsed: aq_clean::CleaningReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.summary.rows_after, report.summary.rows_after);
    assert_eq!(parsed.t_test.df, report.t_test.df);
}
