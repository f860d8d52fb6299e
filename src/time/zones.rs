use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// The fixed zone all timestamps are converted into for display and storage.
///
/// The tracker records instants in UTC without a zone marker; the cleaned
/// dataset carries them in this zone with an explicit offset.
pub const LOCAL_ZONE: Tz = chrono_tz::America::Santiago;

/// Naive formats the export has been observed to use. Fractional seconds are
/// optional in the seconds-bearing variants.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Offset-bearing format used for localized timestamps in the cleaned output.
const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

/// Parse a raw export timestamp into its naive (zone-less) form.
///
/// # Arguments
/// * `raw` - Timestamp string as found in the export, e.g. `2023-11-28 23:59:00.000`
///
/// # Returns
/// * `NaiveDateTime` - The parsed wall-clock value, carrying no zone yet
///
/// # Example
/// ```
/// use sleep_insights::time::zones::parse_naive_timestamp;
/// let naive = parse_naive_timestamp("2024-01-01 03:00:00").unwrap();
/// ```
pub fn parse_naive_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive);
        }
    }
    Err(anyhow!("Unrecognized timestamp format: '{}'", raw))
}

/// Convert a UTC instant into the fixed local zone.
///
/// # Arguments
/// * `instant` - An instant already tagged as UTC
///
/// # Returns
/// * `DateTime<Tz>` - The same instant expressed in [`LOCAL_ZONE`]
pub fn utc_to_local(instant: DateTime<Utc>) -> DateTime<Tz> {
    instant.with_timezone(&LOCAL_ZONE)
}

/// Parse a raw export timestamp and localize it.
///
/// The raw value is naive; it is first tagged as UTC (the tracker records
/// UTC instants without a marker, never local wall-clock time) and only then
/// converted into the fixed zone. Parsing alone would leave the value
/// ambiguous.
///
/// # Example
/// ```
/// use sleep_insights::time::zones::{format_local, parse_and_localize};
///
/// let localized = parse_and_localize("2024-01-01 03:00:00").unwrap();
/// assert_eq!(format_local(&localized), "2024-01-01 00:00:00-03:00");
/// ```
pub fn parse_and_localize(raw: &str) -> Result<DateTime<Tz>> {
    let naive = parse_naive_timestamp(raw)?;
    Ok(utc_to_local(naive.and_utc()))
}

/// Format a localized timestamp with its UTC offset.
///
/// Fractional seconds are emitted only when non-zero, so typical export rows
/// round-trip as `2023-12-31 23:00:00-03:00`.
pub fn format_local(instant: &DateTime<Tz>) -> String {
    instant.format(LOCAL_FORMAT).to_string()
}

/// Parse an offset-bearing localized timestamp back into the fixed zone.
///
/// Inverse of [`format_local`], used when typed records are rebuilt from an
/// already-localized table.
pub fn parse_local(raw: &str) -> Result<DateTime<Tz>> {
    let parsed = DateTime::parse_from_str(raw.trim(), LOCAL_FORMAT)
        .with_context(|| format!("Invalid localized timestamp: '{}'", raw))?;
    Ok(parsed.with_timezone(&LOCAL_ZONE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localizes_summer_instant_at_minus_three() {
        // January is daylight-saving time in Chile
        let localized = parse_and_localize("2024-01-01 03:00:00").unwrap();
        assert_eq!(format_local(&localized), "2024-01-01 00:00:00-03:00");
    }

    #[test]
    fn localizes_winter_instant_at_minus_four() {
        let localized = parse_and_localize("2024-06-15 12:00:00").unwrap();
        assert_eq!(format_local(&localized), "2024-06-15 08:00:00-04:00");
    }

    #[test]
    fn conversion_can_cross_the_date_line() {
        let localized = parse_and_localize("2024-01-01 02:59:00").unwrap();
        assert_eq!(format_local(&localized), "2023-12-31 23:59:00-03:00");
    }

    #[test]
    fn accepts_observed_format_variants() {
        assert!(parse_naive_timestamp("2023-11-28 23:59:00.000").is_ok());
        assert!(parse_naive_timestamp("2023-11-28T23:59:00").is_ok());
        assert!(parse_naive_timestamp("2023-11-28 23:59").is_ok());
        assert!(parse_naive_timestamp("  2023-11-28 23:59:00  ").is_ok());
    }

    #[test]
    fn zero_fraction_is_dropped_on_format() {
        let localized = parse_and_localize("2023-11-28 23:59:00.000").unwrap();
        assert!(!format_local(&localized).contains('.'));

        let localized = parse_and_localize("2023-11-28 23:59:00.250").unwrap();
        assert_eq!(format_local(&localized), "2023-11-28 20:59:00.250-03:00");
    }

    #[test]
    fn rejects_malformed_timestamps() {
        assert!(parse_naive_timestamp("28/11/2023 23:59").is_err());
        assert!(parse_naive_timestamp("not a timestamp").is_err());
        assert!(parse_naive_timestamp("").is_err());
    }

    #[test]
    fn localized_values_round_trip() {
        let original = parse_and_localize("2024-03-10 07:45:12").unwrap();
        let reparsed = parse_local(&format_local(&original)).unwrap();
        assert_eq!(original, reparsed);
    }
}
