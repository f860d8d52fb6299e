use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Write the cleaned table to a CSV file with header.
///
/// Any existing file at `path` is truncated; there is no partial-write
/// protection. Column order is whatever the frame carries, which for the
/// pipeline's output is the fixed cleaned schema ending in `is_nap`.
pub fn write_cleaned_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    let mut out = df.clone();
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut out)
        .with_context(|| format!("Failed to write cleaned CSV: {}", path.display()))?;

    info!("Wrote {} cleaned row(s) to {}", df.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn cleaned_frame() -> DataFrame {
        df!(
            "sleep_score" => vec![85.0, 60.0],
            "sleep_duration" => vec![Some(420.0), None],
            "nap_score" => vec![0.0, 1.0],
            "physical_recovery" => vec![Some(90.0), None],
            "sleep_start_time" => vec![Some("2024-01-01 00:00:00-03:00".to_string()), None],
            "sleep_end_time" => vec![Some("2024-01-01 07:00:00-03:00".to_string()), None],
            "is_nap" => vec![false, true],
        )
        .unwrap()
    }

    #[test]
    fn test_write_cleaned_csv_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");

        write_cleaned_csv(&cleaned_frame(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next().unwrap(),
            "sleep_score,sleep_duration,nap_score,physical_recovery,sleep_start_time,sleep_end_time,is_nap"
        );
        assert_eq!(written.lines().count(), 3);
        assert!(written.contains("true"));
    }

    #[test]
    fn test_write_cleaned_csv_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");
        std::fs::write(&path, "stale content that should disappear").unwrap();

        write_cleaned_csv(&cleaned_frame(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.starts_with("sleep_score"));
    }

    #[test]
    fn test_write_cleaned_csv_bad_path_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("cleaned.csv");

        let err = write_cleaned_csv(&cleaned_frame(), &path).unwrap_err();
        assert!(err.to_string().contains("Failed to create output file"));
    }
}
