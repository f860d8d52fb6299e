use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::core::domain::SleepRecord;
use crate::parsing::csv_parser::{self, TIMESTAMP_COLUMNS};
use crate::parsing::sanitizer;
use crate::preprocessing::validator::{SleepValidator, ValidationResult};
use crate::transformations::{cleaning, timezone};

/// Result of a full cleaning run
#[derive(Debug)]
pub struct CleanResult {
    pub dataframe: DataFrame,
    pub records: Vec<SleepRecord>,
    pub validation: ValidationResult,
    pub total_rows: usize,
    pub dropped_rows: usize,
    pub imputed_rows: usize,
}

/// Configuration for the cleaning pipeline
pub struct CleanConfig {
    pub validate: bool,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self { validate: true }
    }
}

/// Main cleaning pipeline
pub struct CleanPipeline {
    config: CleanConfig,
}

impl CleanPipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: CleanConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: CleanConfig) -> Self {
        Self { config }
    }

    /// Run the full cleaning sequence over a raw export.
    ///
    /// Sanitizes the raw file into `sanitized_path`, then parses, projects,
    /// filters, localizes, imputes and flags the frame, converts it to typed
    /// records, and (by default) validates the result. Stages run strictly in
    /// order; the first failure aborts the run.
    ///
    /// # Arguments
    /// * `raw_path` - Path to the malformed export
    /// * `sanitized_path` - Where the repaired intermediate file is written
    ///
    /// # Returns
    /// CleanResult with the cleaned frame, typed records, validation report
    /// and run counters
    pub fn process(&self, raw_path: &Path, sanitized_path: &Path) -> Result<CleanResult> {
        // Step 1: Repair the raw export line by line
        let lines = sanitizer::sanitize_export(raw_path, sanitized_path)
            .context("Failed to sanitize raw export")?;
        debug!("Sanitizer wrote {} lines", lines);

        // Step 2: Parse and project the feature columns
        let df = csv_parser::parse_sleep_csv(sanitized_path)
            .context("Failed to parse sanitized export")?;
        let df = csv_parser::select_feature_columns(&df)
            .context("Failed to project feature columns")?;
        let total_rows = df.height();

        // Step 3: Drop rows without a sleep score
        let df = cleaning::drop_missing_scores(&df)
            .context("Failed to filter unscored rows")?;
        let dropped_rows = total_rows - df.height();
        info!(
            "Dropped {} of {} rows without a sleep score",
            dropped_rows, total_rows
        );

        // Step 4: Localize the timestamp columns into the fixed zone
        let df = timezone::localize_timestamps(&df, &TIMESTAMP_COLUMNS)
            .context("Failed to localize timestamps")?;

        // Step 5: Impute missing nap scores and derive the nap flag
        let (df, imputed_rows) =
            cleaning::impute_nap_score(&df).context("Failed to impute nap scores")?;
        info!("Imputed {} missing nap score(s)", imputed_rows);
        let df = cleaning::add_nap_flag(&df).context("Failed to derive nap flag")?;

        // Step 6: Convert to typed records
        let records = csv_parser::dataframe_to_records(&df)
            .context("Failed to convert cleaned frame to records")?;

        // Step 7: Validate (if requested)
        let validation = if self.config.validate {
            let report = SleepValidator::validate_records(&records);
            for warning in &report.warnings {
                warn!("Validation: {}", warning);
            }
            report
        } else {
            ValidationResult::new()
        };

        Ok(CleanResult {
            dataframe: df,
            records,
            validation,
            total_rows,
            dropped_rows,
            imputed_rows,
        })
    }
}

impl Default for CleanPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to clean a raw sleep export
pub fn clean_sleep_export(
    raw_path: &Path,
    sanitized_path: &Path,
    validate: bool,
) -> Result<CleanResult> {
    let pipeline = CleanPipeline::with_config(CleanConfig { validate });
    pipeline.process(raw_path, sanitized_path)
}
