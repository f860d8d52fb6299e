//! Domain model for cleaned sleep sessions.
//!
//! This module provides the typed record the pipeline produces after cleaning,
//! along with the nap threshold that drives imputation and the derived values
//! used by validation, summaries, and plotting.

use chrono::DateTime;
use chrono_tz::Tz;

/// Sessions lasting at most this many minutes are classified as naps when the
/// nap score is missing and has to be imputed from duration.
///
/// The threshold is inclusive: a 180-minute session counts as a nap.
///
/// # Examples
///
/// ```
/// use sleep_insights::core::domain::NAP_DURATION_CUTOFF_MIN;
///
/// assert!(150.0 <= NAP_DURATION_CUTOFF_MIN);
/// assert!(400.0 > NAP_DURATION_CUTOFF_MIN);
/// ```
pub const NAP_DURATION_CUTOFF_MIN: f64 = 180.0;

/// Represents a single cleaned sleep session.
///
/// A `SleepRecord` is one row of the cleaned table. The row filter guarantees
/// a sleep score and the imputer guarantees a nap score, so both are plain
/// numbers here; every other measurement may be absent in real exports and
/// stays optional. Timestamps are UTC instants carried in the fixed local
/// zone (America/Santiago).
///
/// # Fields
///
/// * `sleep_score` - Primary quality metric (never null after cleaning)
/// * `sleep_duration` - Session length in minutes (optional)
/// * `nap_score` - 0/1 nap indicator, imputed from duration when missing
/// * `physical_recovery` - Recovery metric, passed through unmodified (optional)
/// * `sleep_start_time` - Session start, localized (optional)
/// * `sleep_end_time` - Session end, localized (optional)
/// * `is_nap` - Derived flag, true iff `nap_score >= 1`
///
/// # Examples
///
/// ```
/// use sleep_insights::core::domain::SleepRecord;
///
/// let record = SleepRecord {
///     sleep_score: 85.0,
///     sleep_duration: Some(420.0),
///     nap_score: 0.0,
///     physical_recovery: Some(90.0),
///     sleep_start_time: None,
///     sleep_end_time: None,
///     is_nap: false,
/// };
///
/// assert_eq!(record.duration_hours(), Some(7.0));
/// assert!(record.nap_flag_consistent());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SleepRecord {
    pub sleep_score: f64,
    pub sleep_duration: Option<f64>,
    pub nap_score: f64,
    pub physical_recovery: Option<f64>,
    pub sleep_start_time: Option<DateTime<Tz>>,
    pub sleep_end_time: Option<DateTime<Tz>>,
    pub is_nap: bool,
}

impl SleepRecord {
    /// Returns the session duration in hours, if the export recorded one.
    ///
    /// # Examples
    ///
    /// ```
    /// use sleep_insights::core::domain::SleepRecord;
    ///
    /// let record = SleepRecord {
    ///     sleep_score: 70.0,
    ///     sleep_duration: Some(90.0),
    ///     nap_score: 1.0,
    ///     physical_recovery: None,
    ///     sleep_start_time: None,
    ///     sleep_end_time: None,
    ///     is_nap: true,
    /// };
    ///
    /// assert_eq!(record.duration_hours(), Some(1.5));
    /// ```
    pub fn duration_hours(&self) -> Option<f64> {
        self.sleep_duration.map(|minutes| minutes / 60.0)
    }

    /// Returns the hours between start and end timestamp when both are set.
    ///
    /// This is the tracked wall-clock span, not the recorded sleep duration;
    /// the two legitimately differ when the tracker logged awake periods.
    pub fn tracked_span_hours(&self) -> Option<f64> {
        match (self.sleep_start_time, self.sleep_end_time) {
            (Some(start), Some(end)) => {
                Some((end - start).num_seconds() as f64 / 3600.0)
            }
            _ => None,
        }
    }

    /// Returns `true` if the derived nap flag agrees with the nap score.
    ///
    /// After cleaning this must hold for every record: `is_nap` is defined as
    /// `nap_score >= 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sleep_insights::core::domain::SleepRecord;
    ///
    /// let record = SleepRecord {
    ///     sleep_score: 60.0,
    ///     sleep_duration: Some(45.0),
    ///     nap_score: 1.0,
    ///     physical_recovery: None,
    ///     sleep_start_time: None,
    ///     sleep_end_time: None,
    ///     is_nap: false,
    /// };
    ///
    /// assert!(!record.nap_flag_consistent());
    /// ```
    pub fn nap_flag_consistent(&self) -> bool {
        self.is_nap == (self.nap_score >= 1.0)
    }

    /// Categorizes the session duration into a human-readable bin.
    ///
    /// Maps duration in hours to descriptive categories for summaries.
    /// The bins are:
    /// - "Unknown" when the export carries no duration
    /// - "Nap-length (<3h)" below three hours
    /// - "Short (3-6h)" for three to under six hours
    /// - "Typical (6-9h)" for six to under nine hours
    /// - "Long (>=9h)" for nine hours and above
    ///
    /// # Examples
    ///
    /// ```
    /// use sleep_insights::core::domain::SleepRecord;
    ///
    /// let record = SleepRecord {
    ///     sleep_score: 88.0,
    ///     sleep_duration: Some(450.0),
    ///     nap_score: 0.0,
    ///     physical_recovery: None,
    ///     sleep_start_time: None,
    ///     sleep_end_time: None,
    ///     is_nap: false,
    /// };
    ///
    /// assert_eq!(record.duration_bin(), "Typical (6-9h)");
    /// ```
    pub fn duration_bin(&self) -> &'static str {
        match self.duration_hours() {
            None => "Unknown",
            Some(hours) if hours < 3.0 => "Nap-length (<3h)",
            Some(hours) if hours < 6.0 => "Short (3-6h)",
            Some(hours) if hours < 9.0 => "Typical (6-9h)",
            Some(_) => "Long (>=9h)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Santiago;

    fn record(duration: Option<f64>, nap_score: f64, is_nap: bool) -> SleepRecord {
        SleepRecord {
            sleep_score: 80.0,
            sleep_duration: duration,
            nap_score,
            physical_recovery: None,
            sleep_start_time: None,
            sleep_end_time: None,
            is_nap,
        }
    }

    #[test]
    fn duration_helpers() {
        let rec = record(Some(420.0), 0.0, false);
        assert_eq!(rec.duration_hours(), Some(7.0));

        let rec = record(None, 0.0, false);
        assert_eq!(rec.duration_hours(), None);
        assert_eq!(rec.duration_bin(), "Unknown");
    }

    #[test]
    fn tracked_span_uses_both_timestamps() {
        let mut rec = record(Some(480.0), 0.0, false);
        assert_eq!(rec.tracked_span_hours(), None);

        rec.sleep_start_time = Some(Santiago.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap());
        rec.sleep_end_time = Some(Santiago.with_ymd_and_hms(2024, 1, 2, 7, 30, 0).unwrap());
        assert_eq!(rec.tracked_span_hours(), Some(8.5));
    }

    #[test]
    fn nap_flag_consistency() {
        assert!(record(Some(90.0), 1.0, true).nap_flag_consistent());
        assert!(record(Some(400.0), 0.0, false).nap_flag_consistent());
        assert!(!record(Some(90.0), 1.0, false).nap_flag_consistent());
    }

    #[test]
    fn duration_bins_cover_boundaries() {
        let bins = vec![
            (Some(60.0), "Nap-length (<3h)"),
            (Some(180.0), "Short (3-6h)"),
            (Some(360.0), "Typical (6-9h)"),
            (Some(540.0), "Long (>=9h)"),
            (None, "Unknown"),
        ];

        for (duration, expected_bin) in bins {
            assert_eq!(record(duration, 0.0, false).duration_bin(), expected_bin);
        }
    }
}
