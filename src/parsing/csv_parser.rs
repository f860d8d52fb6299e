use anyhow::{bail, Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::core::domain::SleepRecord;
use crate::time::zones;

/// Raw header names the tracker uses for the timestamp columns.
pub const RAW_START_TIME: &str = "com.samsung.health.sleep.start_time";
pub const RAW_END_TIME: &str = "com.samsung.health.sleep.end_time";

/// Columns projected out of the raw export, in output order.
pub const FEATURE_COLUMNS: [&str; 6] = [
    "sleep_score",
    "sleep_duration",
    "nap_score",
    "physical_recovery",
    RAW_START_TIME,
    RAW_END_TIME,
];

/// Timestamp columns after renaming, in output order.
pub const TIMESTAMP_COLUMNS: [&str; 2] = ["sleep_start_time", "sleep_end_time"];

/// Numeric columns cast to Float64 after CSV inference.
const NUMERIC_COLUMNS: [&str; 4] = [
    "sleep_score",
    "sleep_duration",
    "nap_score",
    "physical_recovery",
];

/// Parse the sanitized sleep CSV into a Polars DataFrame
pub fn parse_sleep_csv(csv_path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(csv_path.into()))?
        .finish()
        .with_context(|| format!("Failed to parse CSV: {}", csv_path.display()))?;

    // Get existing column names
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    // Cast columns to expected types if they were inferred incorrectly
    let mut lazy_df = df.lazy();

    // Timestamps stay strings; the timezone stage owns all temporal parsing.
    // An all-null column may have been inferred as something else entirely.
    for col_name in [RAW_START_TIME, RAW_END_TIME] {
        if column_names.contains(&col_name.to_string()) {
            lazy_df = lazy_df.with_column(col(col_name).cast(DataType::String));
        }
    }

    // Numeric columns that should be Float64 (may be inferred as i64 if no decimal point)
    for col_name in NUMERIC_COLUMNS {
        if column_names.contains(&col_name.to_string()) {
            lazy_df = lazy_df.with_column(
                when(col(col_name).is_not_null())
                    .then(col(col_name).cast(DataType::Float64))
                    .otherwise(lit(NULL).cast(DataType::Float64))
                    .alias(col_name),
            );
        }
    }

    let df = lazy_df
        .collect()
        .context("Failed to cast columns to expected types")?;

    Ok(df)
}

/// Project the six feature columns and rename the timestamp pair.
///
/// Fails when any required column is absent from the frame. The projection
/// order is fixed and matches the cleaned output schema.
pub fn select_feature_columns(df: &DataFrame) -> Result<DataFrame> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<&str> = FEATURE_COLUMNS
        .iter()
        .copied()
        .filter(|name| !column_names.contains(&name.to_string()))
        .collect();
    if !missing.is_empty() {
        bail!("Missing required column(s): {}", missing.join(", "));
    }

    let mut projected = df
        .select(FEATURE_COLUMNS)
        .context("Failed to project feature columns")?;

    projected.rename(RAW_START_TIME, "sleep_start_time".into())?;
    projected.rename(RAW_END_TIME, "sleep_end_time".into())?;

    Ok(projected)
}

/// Convert a cleaned DataFrame to typed sleep records
///
/// Expects the fully cleaned frame: scores filtered, timestamps localized,
/// nap scores imputed, and the nap flag derived.
pub fn dataframe_to_records(df: &DataFrame) -> Result<Vec<SleepRecord>> {
    let height = df.height();
    let mut records = Vec::with_capacity(height);

    // Extract columns
    let scores = df.column("sleep_score")?.f64()?;
    let durations = df.column("sleep_duration")?.f64()?;
    let nap_scores = df.column("nap_score")?.f64()?;
    let recoveries = df.column("physical_recovery")?.f64()?;
    let start_times = df.column("sleep_start_time")?.str()?;
    let end_times = df.column("sleep_end_time")?.str()?;
    let nap_flags = df.column("is_nap")?.bool()?;

    for i in 0..height {
        let sleep_score = scores
            .get(i)
            .with_context(|| format!("Missing sleep_score at row {}", i))?;

        let nap_score = nap_scores
            .get(i)
            .with_context(|| format!("Missing nap_score at row {}", i))?;

        let is_nap = nap_flags
            .get(i)
            .with_context(|| format!("Missing is_nap at row {}", i))?;

        let sleep_start_time = start_times
            .get(i)
            .map(zones::parse_local)
            .transpose()
            .with_context(|| format!("Invalid sleep_start_time at row {}", i))?;

        let sleep_end_time = end_times
            .get(i)
            .map(zones::parse_local)
            .transpose()
            .with_context(|| format!("Invalid sleep_end_time at row {}", i))?;

        records.push(SleepRecord {
            sleep_score,
            sleep_duration: durations.get(i),
            nap_score,
            physical_recovery: recoveries.get(i),
            sleep_start_time,
            sleep_end_time,
            is_nap,
        });
    }

    Ok(records)
}

/// Convert sleep records back to a DataFrame in the cleaned output schema
pub fn records_to_dataframe(records: &[SleepRecord]) -> Result<DataFrame> {
    let n = records.len();

    // Prepare column vectors
    let mut scores = Vec::with_capacity(n);
    let mut durations = Vec::with_capacity(n);
    let mut nap_scores = Vec::with_capacity(n);
    let mut recoveries = Vec::with_capacity(n);
    let mut start_times = Vec::with_capacity(n);
    let mut end_times = Vec::with_capacity(n);
    let mut nap_flags = Vec::with_capacity(n);

    for record in records {
        scores.push(record.sleep_score);
        durations.push(record.sleep_duration);
        nap_scores.push(record.nap_score);
        recoveries.push(record.physical_recovery);
        start_times.push(record.sleep_start_time.as_ref().map(zones::format_local));
        end_times.push(record.sleep_end_time.as_ref().map(zones::format_local));
        nap_flags.push(record.is_nap);
    }

    // Create DataFrame with columns in the cleaned output order
    let df = df!(
        "sleep_score" => scores,
        "sleep_duration" => durations,
        "nap_score" => nap_scores,
        "physical_recovery" => recoveries,
        "sleep_start_time" => start_times,
        "sleep_end_time" => end_times,
        "is_nap" => nap_flags,
    )?;

    Ok(df)
}
