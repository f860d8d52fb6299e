use polars::prelude::*;

use crate::core::domain::NAP_DURATION_CUTOFF_MIN;

/// Remove rows with a missing sleep score
pub fn drop_missing_scores(df: &DataFrame) -> PolarsResult<DataFrame> {
    let score_col = df.column("sleep_score")?;
    let mask = score_col.is_not_null();
    df.filter(&mask)
}

/// Fill missing nap scores from session duration.
///
/// Sessions at or under [`NAP_DURATION_CUTOFF_MIN`] minutes become naps (1),
/// longer ones full sleeps (0). Present values are never touched or
/// re-validated against the rule. A row missing both nap score and duration
/// cannot be classified and fails the run. Returns the frame together with
/// the number of rows filled.
pub fn impute_nap_score(df: &DataFrame) -> PolarsResult<(DataFrame, usize)> {
    let nap_scores = df.column("nap_score")?.f64()?;
    let durations = df.column("sleep_duration")?.f64()?;

    let mut imputed = 0usize;
    let mut filled: Vec<f64> = Vec::with_capacity(df.height());

    for (i, (nap_score, duration)) in nap_scores.into_iter().zip(durations).enumerate() {
        match nap_score {
            Some(value) => filled.push(value),
            None => match duration {
                Some(minutes) => {
                    filled.push(if minutes <= NAP_DURATION_CUTOFF_MIN {
                        1.0
                    } else {
                        0.0
                    });
                    imputed += 1;
                }
                None => {
                    return Err(PolarsError::ComputeError(
                        format!(
                            "Cannot impute nap_score at row {}: sleep_duration is also missing",
                            i
                        )
                        .into(),
                    ))
                }
            },
        }
    }

    let mut out = df.clone();
    out.with_column(Column::new("nap_score".into(), filled))?;
    Ok((out, imputed))
}

/// Derive the boolean nap flag (`nap_score >= 1`) for every record
pub fn add_nap_flag(df: &DataFrame) -> PolarsResult<DataFrame> {
    let nap_scores = df.column("nap_score")?.f64()?;
    let flags: Vec<bool> = nap_scores
        .into_iter()
        .map(|score| score.map_or(false, |value| value >= 1.0))
        .collect();

    let mut out = df.clone();
    out.with_column(Column::new("is_nap".into(), flags))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_missing_scores() {
        let df = df!(
            "sleep_score" => vec![Some(85.0), None, Some(60.0)],
            "sleep_duration" => vec![Some(420.0), Some(300.0), None],
        )
        .unwrap();

        let cleaned = drop_missing_scores(&df).unwrap();
        assert_eq!(cleaned.height(), 2);

        let scores = cleaned.column("sleep_score").unwrap().f64().unwrap();
        assert_eq!(scores.get(0), Some(85.0));
        assert_eq!(scores.get(1), Some(60.0));
    }

    #[test]
    fn test_impute_nap_score_threshold() {
        let df = df!(
            "sleep_score" => vec![80.0, 75.0, 90.0, 85.0],
            "sleep_duration" => vec![Some(150.0), Some(180.0), Some(400.0), Some(500.0)],
            "nap_score" => vec![None, None, None, Some(1.0)],
        )
        .unwrap();

        let (imputed_df, imputed) = impute_nap_score(&df).unwrap();
        assert_eq!(imputed, 3);

        let nap_scores = imputed_df.column("nap_score").unwrap().f64().unwrap();
        assert_eq!(nap_scores.get(0), Some(1.0)); // short session
        assert_eq!(nap_scores.get(1), Some(1.0)); // exactly at the cutoff
        assert_eq!(nap_scores.get(2), Some(0.0)); // long session
        assert_eq!(nap_scores.get(3), Some(1.0)); // present value untouched
    }

    #[test]
    fn test_impute_nap_score_fails_without_duration() {
        let df = df!(
            "sleep_score" => vec![80.0],
            "sleep_duration" => vec![Option::<f64>::None],
            "nap_score" => vec![Option::<f64>::None],
        )
        .unwrap();

        let err = impute_nap_score(&df).unwrap_err();
        assert!(err.to_string().contains("row 0"), "got: {}", err);
    }

    #[test]
    fn test_add_nap_flag() {
        let df = df!(
            "nap_score" => vec![0.0, 1.0, 2.0],
        )
        .unwrap();

        let flagged = add_nap_flag(&df).unwrap();
        let flags = flagged.column("is_nap").unwrap().bool().unwrap();
        assert_eq!(flags.get(0), Some(false));
        assert_eq!(flags.get(1), Some(true));
        assert_eq!(flags.get(2), Some(true));
    }
}
