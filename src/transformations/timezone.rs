use anyhow::{Context, Result};
use polars::prelude::*;

use crate::time::zones;

/// Localize the named timestamp columns of a frame.
///
/// Each raw value is parsed as a naive timestamp, tagged as UTC, converted
/// into the fixed local zone, and re-serialized with its offset. Null cells
/// stay null; a malformed cell fails with its column and row, it is never
/// coerced to null.
pub fn localize_timestamps(df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let mut out = df.clone();
    for &column in columns {
        let localized = localize_column(&out, column)?;
        out.with_column(localized)?;
    }
    Ok(out)
}

fn localize_column(df: &DataFrame, column: &str) -> Result<Column> {
    let raw = df
        .column(column)
        .with_context(|| format!("Missing timestamp column: {}", column))?
        .str()
        .with_context(|| format!("Timestamp column '{}' is not a string column", column))?;

    let mut localized: Vec<Option<String>> = Vec::with_capacity(raw.len());
    for (i, value) in raw.into_iter().enumerate() {
        match value {
            Some(ts) => {
                let instant = zones::parse_and_localize(ts)
                    .with_context(|| format!("Invalid {} at row {}", column, i))?;
                localized.push(Some(zones::format_local(&instant)));
            }
            None => localized.push(None),
        }
    }

    Ok(Column::new(column.into(), localized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localize_timestamps_converts_both_columns() {
        let df = df!(
            "sleep_start_time" => vec![Some("2024-01-01 03:00:00".to_string()), None],
            "sleep_end_time" => vec![Some("2024-06-15 12:00:00".to_string()), None],
        )
        .unwrap();

        let localized =
            localize_timestamps(&df, &["sleep_start_time", "sleep_end_time"]).unwrap();

        let starts = localized.column("sleep_start_time").unwrap().str().unwrap();
        assert_eq!(starts.get(0), Some("2024-01-01 00:00:00-03:00"));
        assert_eq!(starts.get(1), None);

        let ends = localized.column("sleep_end_time").unwrap().str().unwrap();
        assert_eq!(ends.get(0), Some("2024-06-15 08:00:00-04:00"));
    }

    #[test]
    fn test_localize_timestamps_reports_malformed_cell() {
        let df = df!(
            "sleep_start_time" => vec![
                Some("2024-01-01 03:00:00".to_string()),
                Some("yesterday".to_string()),
            ],
        )
        .unwrap();

        let err = localize_timestamps(&df, &["sleep_start_time"]).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("row 1"), "got: {}", message);
        assert!(message.contains("sleep_start_time"), "got: {}", message);
    }

    #[test]
    fn test_localize_timestamps_missing_column_fails() {
        let df = df!(
            "sleep_start_time" => vec![Some("2024-01-01 03:00:00".to_string())],
        )
        .unwrap();

        let err = localize_timestamps(&df, &["sleep_end_time"]).unwrap_err();
        assert!(err.to_string().contains("sleep_end_time"), "got: {}", err);
    }
}
