//! Report generation.
//!
//! Assembles the serializable [`CleaningReport`] from a pipeline outcome and
//! renders the console-facing tables. JSON reports are only written to disk
//! when the caller asks for one.

use crate::error::Result;
use crate::types::{CleaningSummary, ColumnSummary, PipelineOutcome, TTestResult};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Full report of one cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Shape and action summary
    pub summary: CleaningSummary,
    /// Descriptive statistics over the cleaned table
    pub column_summaries: Vec<ColumnSummary>,
    /// t-test of the first configured column, original vs. cleaned
    pub t_test: TTestResult,
    /// Every action taken, in order
    pub processing_steps: Vec<String>,
}

/// Builds and writes [`CleaningReport`]s.
pub struct ReportGenerator {
    output_dir: PathBuf,
    output_name: Option<String>,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outputs"),
            output_name: None,
        }
    }
}

impl ReportGenerator {
    /// Create a new ReportGenerator with custom output settings.
    pub fn new(output_dir: PathBuf, output_name: Option<String>) -> Self {
        Self {
            output_dir,
            output_name,
        }
    }

    /// Assemble the report for one pipeline outcome.
    pub fn build_report(&self, input_file: &str, outcome: &PipelineOutcome) -> CleaningReport {
        CleaningReport {
            generated_at: Local::now().to_rfc3339(),
            input_file: input_file.to_string(),
            summary: outcome.summary.clone(),
            column_summaries: outcome.column_summaries.clone(),
            t_test: outcome.t_test.clone(),
            processing_steps: outcome.processing_steps.clone(),
        }
    }

    /// Write the report as pretty-printed JSON to the output directory.
    ///
    /// The file is named `<stem>_report.json`, or `<output_name>.json` when
    /// a custom name was configured.
    pub fn write_report_to_file(
        &self,
        report: &CleaningReport,
        input_stem: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let file_name = match &self.output_name {
            Some(name) => format!("{}.json", name),
            None => format!("{}_report.json", input_stem),
        };
        let path = self.output_dir.join(file_name);

        let mut file = File::create(&path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;
        info!("Report written to: {}", path.display());

        Ok(path)
    }
}

/// Render the descriptive-statistics table for console output.
pub fn format_describe_table(summaries: &[ColumnSummary]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<12} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "Column", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max"
    ));
    out.push_str(&format!("{}\n", "-".repeat(96)));

    for s in summaries {
        out.push_str(&format!(
            "{:<12} {:>7} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3}\n",
            s.column, s.count, s.mean, s.std, s.min, s.q1, s.median, s.q3, s.max
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> ColumnSummary {
        ColumnSummary {
            column: "Ozone".to_string(),
            count: 100,
            mean: 40.2,
            std: 20.1,
            min: 1.0,
            q1: 20.0,
            median: 35.0,
            q3: 60.0,
            max: 120.0,
        }
    }

    #[test]
    fn test_format_describe_table() {
        let table = format_describe_table(&[sample_summary()]);

        assert!(table.contains("Ozone"));
        assert!(table.contains("Count"));
        assert!(table.contains("40.200"));
        assert!(table.contains("25%"));
    }

    #[test]
    fn test_report_serialization_round_trip() {
        let report = CleaningReport {
            generated_at: "2026-01-01T00:00:00+00:00".to_string(),
            input_file: "airquality.csv".to_string(),
            summary: CleaningSummary {
                duration_ms: 12,
                rows_before: 153,
                rows_after: 140,
                rows_removed: 13,
                missing_counts: vec![],
                imputations: vec![],
                filter_steps: vec![],
            },
            column_summaries: vec![sample_summary()],
            t_test: TTestResult {
                statistic: -0.5,
                p_value: 0.61,
                df: 290.0,
            },
            processing_steps: vec!["Filled 'Ozone' with mean: 42.13 (37 values)".to_string()],
        };

        let json = serde_json::to_string(&report).unwrap();
        let parsed: CleaningReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.input_file, "airquality.csv");
        assert_eq!(parsed.summary.rows_removed, 13);
        assert_eq!(parsed.column_summaries.len(), 1);
    }
}
