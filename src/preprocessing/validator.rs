//! Data-quality validation for the cleaned sleep table.
//!
//! This module checks the cleaned output against the invariants the pipeline
//! promises (non-null scores, consistent nap flag) and reports softer quality
//! findings (out-of-range scores, odd durations, inverted timestamps) without
//! mutating any data. It is the structured replacement for eyeballing the
//! frame summary by hand.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::domain::SleepRecord;

/// Findings beyond this count are summarized rather than listed one by one.
const MAX_REPORTED_FINDINGS: usize = 5;

/// Validation outcome with categorized issues and statistics.
///
/// Errors are invariant violations and make `is_valid` false; warnings flag
/// suspicious but processable data and leave the result valid.
///
/// # Examples
///
/// ```
/// use sleep_insights::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid);
///
/// result.add_error("nap flag disagrees with nap score".to_string());
/// assert!(!result.is_valid);
/// assert_eq!(result.errors.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary statistics computed while validating the cleaned records.
///
/// # Fields
///
/// * `total_records` - Number of cleaned records validated
/// * `nap_records` - Records flagged as naps
/// * `full_sleep_records` - Records flagged as full sleeps
/// * `missing_durations` - Records without a recorded duration
/// * `missing_recovery` - Records without a physical recovery value
/// * `missing_timestamps` - Records missing a start or end time
/// * `out_of_range_scores` - Sleep scores outside 0-100
/// * `invalid_durations` - Non-positive recorded durations
/// * `inconsistent_nap_flags` - Records where `is_nap != (nap_score >= 1)`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_records: usize,
    pub nap_records: usize,
    pub full_sleep_records: usize,
    pub missing_durations: usize,
    pub missing_recovery: usize,
    pub missing_timestamps: usize,
    pub out_of_range_scores: usize,
    pub invalid_durations: usize,
    pub inconsistent_nap_flags: usize,
}

impl ValidationResult {
    /// Creates a fresh result: valid, with empty error and warning lists.
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds an invariant violation and marks the result invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Adds a non-critical finding without invalidating the result.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for cleaned sleep data.
///
/// Works on both the typed records and the persisted frame: the record path
/// checks the cleaning invariants per row, the frame path checks the output
/// schema.
///
/// # Examples
///
/// ```no_run
/// use sleep_insights::preprocessing::validator::SleepValidator;
/// use sleep_insights::core::domain::SleepRecord;
///
/// # fn example(records: &[SleepRecord]) {
/// let result = SleepValidator::validate_records(records);
/// if !result.is_valid {
///     eprintln!("Validation failed: {:?}", result.errors);
/// }
/// println!("Validated {} records", result.stats.total_records);
/// # }
/// ```
pub struct SleepValidator;

impl SleepValidator {
    /// Validates a slice of cleaned sleep records.
    ///
    /// Errors: inconsistent nap flags (the `is_nap == (nap_score >= 1)`
    /// invariant). Warnings: scores outside 0-100, nap scores outside {0, 1},
    /// non-positive durations, end times not after start times. Missing
    /// optional fields are counted in the statistics only.
    pub fn validate_records(records: &[SleepRecord]) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.stats.total_records = records.len();

        for (i, record) in records.iter().enumerate() {
            Self::validate_record(i, record, &mut result);
        }

        Self::summarize_capped(&mut result);

        result
    }

    /// Validates the cleaned output frame's schema.
    ///
    /// Checks that every output column is present and that the key columns
    /// carry no nulls. Value-level checks live on the record path; this
    /// guards the shape of what gets persisted.
    pub fn validate_dataframe(df: &DataFrame) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.stats.total_records = df.height();

        let required_cols = [
            "sleep_score",
            "sleep_duration",
            "nap_score",
            "physical_recovery",
            "sleep_start_time",
            "sleep_end_time",
            "is_nap",
        ];

        for col in required_cols {
            if df.column(col).is_err() {
                result.add_error(format!("Missing required column: {}", col));
            }
        }

        if !result.is_valid {
            return result;
        }

        for col in ["sleep_score", "nap_score", "is_nap"] {
            if let Ok(column) = df.column(col) {
                let nulls = column.null_count();
                if nulls > 0 {
                    result.add_error(format!("Column '{}' has {} null value(s)", col, nulls));
                }
            }
        }

        if let Ok(flags) = df.column("is_nap") {
            if let Ok(bool_series) = flags.bool() {
                result.stats.nap_records = bool_series.sum().unwrap_or(0) as usize;
                result.stats.full_sleep_records =
                    result.stats.total_records - result.stats.nap_records;
            }
        }

        if let Ok(durations) = df.column("sleep_duration") {
            result.stats.missing_durations = durations.null_count();
        }

        result
    }

    fn validate_record(index: usize, record: &SleepRecord, result: &mut ValidationResult) {
        if record.is_nap {
            result.stats.nap_records += 1;
        } else {
            result.stats.full_sleep_records += 1;
        }

        if record.sleep_duration.is_none() {
            result.stats.missing_durations += 1;
        }
        if record.physical_recovery.is_none() {
            result.stats.missing_recovery += 1;
        }
        if record.sleep_start_time.is_none() || record.sleep_end_time.is_none() {
            result.stats.missing_timestamps += 1;
        }

        if !record.nap_flag_consistent() {
            result.stats.inconsistent_nap_flags += 1;
            if result.stats.inconsistent_nap_flags <= MAX_REPORTED_FINDINGS {
                result.add_error(format!(
                    "Record {} has is_nap={} but nap_score={}",
                    index, record.is_nap, record.nap_score
                ));
            }
        }

        if record.sleep_score < 0.0 || record.sleep_score > 100.0 {
            result.stats.out_of_range_scores += 1;
            if result.stats.out_of_range_scores <= MAX_REPORTED_FINDINGS {
                result.add_warning(format!(
                    "Record {} has sleep score outside 0-100: {}",
                    index, record.sleep_score
                ));
            }
        }

        if record.nap_score != 0.0 && record.nap_score != 1.0 {
            result.add_warning(format!(
                "Record {} has nap score outside {{0, 1}}: {}",
                index, record.nap_score
            ));
        }

        if let Some(duration) = record.sleep_duration {
            if duration <= 0.0 {
                result.stats.invalid_durations += 1;
                if result.stats.invalid_durations <= MAX_REPORTED_FINDINGS {
                    result.add_warning(format!(
                        "Record {} has non-positive duration: {} min",
                        index, duration
                    ));
                }
            }
        }

        if let (Some(start), Some(end)) = (record.sleep_start_time, record.sleep_end_time) {
            if end <= start {
                result.add_warning(format!(
                    "Record {} ends at or before it starts: {} -> {}",
                    index, start, end
                ));
            }
        }
    }

    fn summarize_capped(result: &mut ValidationResult) {
        if result.stats.inconsistent_nap_flags > MAX_REPORTED_FINDINGS {
            result.add_error(format!(
                "Total inconsistent nap flags: {} (showing first {})",
                result.stats.inconsistent_nap_flags, MAX_REPORTED_FINDINGS
            ));
        }
        if result.stats.out_of_range_scores > MAX_REPORTED_FINDINGS {
            result.add_warning(format!(
                "Total out-of-range scores: {} (showing first {})",
                result.stats.out_of_range_scores, MAX_REPORTED_FINDINGS
            ));
        }
        if result.stats.invalid_durations > MAX_REPORTED_FINDINGS {
            result.add_warning(format!(
                "Total non-positive durations: {} (showing first {})",
                result.stats.invalid_durations, MAX_REPORTED_FINDINGS
            ));
        }
    }
}
