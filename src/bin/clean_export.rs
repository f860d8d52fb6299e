use anyhow::Result;
use std::env;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use sleep_insights::io::write_cleaned_csv;
use sleep_insights::plotting::{render_duration_histogram, render_score_vs_duration};
use sleep_insights::preprocessing::{CleanPipeline, CleanResult};

// ========================================
// Fixed paths (relative to the working directory)
// ========================================

const RAW_EXPORT: &str = "sleep.csv";
const SANITIZED_EXPORT: &str = "sleep_pre.csv";
const CLEANED_OUTPUT: &str = "sleep_full_cleaned.csv";
const SCATTER_CHART: &str = "sleep_score_vs_duration.png";
const HISTOGRAM_CHART: &str = "sleep_duration_distribution.png";

fn run() -> Result<CleanResult> {
    let pipeline = CleanPipeline::new();
    let result = pipeline.process(Path::new(RAW_EXPORT), Path::new(SANITIZED_EXPORT))?;

    write_cleaned_csv(&result.dataframe, Path::new(CLEANED_OUTPUT))?;

    render_score_vs_duration(&result.records, Path::new(SCATTER_CHART))?;
    render_duration_histogram(&result.records, Path::new(HISTOGRAM_CHART))?;

    Ok(result)
}

fn print_summary(result: &CleanResult) {
    let naps = result.records.iter().filter(|r| r.is_nap).count();
    let full_sleeps = result.records.len() - naps;

    println!();
    println!("Rows in export:    {}", result.total_rows);
    println!("Dropped (no score): {}", result.dropped_rows);
    println!("Nap scores imputed: {}", result.imputed_rows);
    println!("Cleaned records:    {} ({} full sleeps, {} naps)",
        result.records.len(), full_sleeps, naps);

    let mut bins: Vec<(&str, usize)> = Vec::new();
    for record in &result.records {
        let bin = record.duration_bin();
        match bins.iter_mut().find(|(name, _)| *name == bin) {
            Some((_, count)) => *count += 1,
            None => bins.push((bin, 1)),
        }
    }
    if !bins.is_empty() {
        println!("Duration distribution:");
        for (bin, count) in &bins {
            println!("  {:<18} {}", bin, count);
        }
    }

    if !result.validation.is_valid {
        println!("Validation errors:");
        for error in &result.validation.errors {
            println!("  {}", error);
        }
    }
    if !result.validation.warnings.is_empty() {
        println!("Validation warnings: {}", result.validation.warnings.len());
    }
}

fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    println!("=== Sleep Export Cleaner ===");
    println!("Raw export:  {}", RAW_EXPORT);
    println!("Cleaned CSV: {}", CLEANED_OUTPUT);
    println!("Charts:      {}, {}", SCATTER_CHART, HISTOGRAM_CHART);
    println!();

    match run() {
        Ok(result) => {
            println!("✓ Cleaning completed successfully!");
            print_summary(&result);
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Cleaning failed: {:#}", e);
            Err(e)
        }
    }
}
