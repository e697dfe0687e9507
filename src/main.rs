//! CLI entry point for the air-quality cleaning pipeline.

use anyhow::{Context, Result, anyhow};
use aq_clean::report::format_describe_table;
use aq_clean::{CleaningConfig, CleaningReport, Pipeline, PipelineOutcome, ReportGenerator, loader};
use clap::Parser;
use polars::prelude::*;
use std::path::Path;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Air-quality CSV cleaning and statistics pipeline",
    long_about = "Cleans a tabular air-quality dataset in one pass: mean-imputes missing\n\
                  numeric values, removes outlier rows with a cascaded IQR filter,\n\
                  computes descriptive statistics, min-max normalizes, renders a\n\
                  scatter matrix and box plot, and t-tests the Ozone column before\n\
                  vs. after cleaning.\n\n\
                  EXAMPLES:\n  \
                  # Canonical run over airquality.csv\n  \
                  aq-clean\n\n  \
                  # Different input, no plots\n  \
                  aq-clean data/city.csv --no-plots\n\n  \
                  # Machine-readable report\n  \
                  aq-clean --json | jq .t_test.p_value"
)]
struct Args {
    /// Path to the CSV file to clean
    #[arg(default_value = "airquality.csv")]
    input: String,

    /// Output directory for plots and reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Columns to impute and filter, in cascade order (the first one is the
    /// t-test subject)
    #[arg(long, value_delimiter = ',', default_value = "Ozone,Solar.R,Wind")]
    columns: Vec<String>,

    /// Multiplier applied to the IQR when computing outlier bounds
    #[arg(long, default_value = "1.5")]
    iqr_multiplier: f64,

    /// Skip rendering the scatter matrix and box plot
    #[arg(long)]
    no_plots: bool,

    /// Output JSON to stdout instead of the human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write the JSON report to the output directory
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and the final summary)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading dataset from: {}", args.input);
    let data = loader::read_csv(&args.input)
        .with_context(|| format!("Failed to load {}", args.input))?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    let config = CleaningConfig::builder()
        .columns(args.columns.clone())
        .iqr_multiplier(args.iqr_multiplier)
        .output_dir(&args.output)
        .render_plots(!args.no_plots)
        .build()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;
    let head_rows = config.head_rows;

    let mut builder = Pipeline::builder().config(config);
    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }
    let pipeline = builder.build()?;

    if !args.json {
        print_data_overview(&data, head_rows);
    }

    let outcome = match pipeline.process(data) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            return Err(anyhow!("Pipeline failed: {}", e));
        }
    };

    let generator = ReportGenerator::new(args.output.clone().into(), None);
    let report = generator.build_report(&args.input, &outcome);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        generator.write_report_to_file(&report, &input_stem)?;
    }

    print_cleaning_summary(&outcome, &report, head_rows);

    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print the pre-cleaning view of the data: head rows and missing counts.
///
/// This uses `println!` intentionally: it is the primary output of the run
/// and should be visible regardless of log level.
fn print_data_overview(data: &DataFrame, head_rows: usize) {
    println!("Data Head:");
    println!("{}", data.head(Some(head_rows)));

    println!("\nMissing Values:");
    for col in data.get_columns() {
        println!("  {:<12} {}", col.name(), col.null_count());
    }
    println!();
}

/// Print the human-readable summary of the cleaning run.
fn print_cleaning_summary(outcome: &PipelineOutcome, report: &CleaningReport, head_rows: usize) {
    let summary = &report.summary;

    println!("{}", "=".repeat(80));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!("Missing Values After Imputation:");
    for m in &summary.missing_counts {
        println!("  {:<12} {} -> {}", m.column, m.before, m.after);
    }
    println!();

    println!(
        "Rows: {} -> {} ({} removed by the outlier cascade)",
        summary.rows_before, summary.rows_after, summary.rows_removed
    );
    for step in &summary.filter_steps {
        println!(
            "  '{}' bounds [{:.2}, {:.2}]: removed {} rows",
            step.column, step.lower_bound, step.upper_bound, step.rows_removed
        );
    }
    println!("  Duration: {}ms", summary.duration_ms);
    println!();

    println!("Descriptive Statistics (cleaned data):");
    print!("{}", format_describe_table(&report.column_summaries));
    println!();

    println!("Normalized Data Head:");
    println!("{}", outcome.normalized.head(Some(head_rows)));
    println!();

    println!("T-Test Results:");
    println!(
        "  t-statistic: {:.6}  p-value: {:.6}  df: {}",
        report.t_test.statistic, report.t_test.p_value, report.t_test.df
    );
    println!();

    println!("Conclusion:");
    println!(
        "The air quality data has been successfully cleaned, and descriptive statistics have been calculated."
    );
    println!(
        "Data normalization and visualization provided additional insights into the distribution and relationships between variables."
    );
    println!(
        "The t-test indicates whether the cleaning process significantly altered the mean values, providing a basis for further decision-making."
    );
    println!(
        "The cleaned data is now ready for use in machine learning models or further statistical analysis."
    );
}
