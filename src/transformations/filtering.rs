use crate::core::domain::SleepRecord;

/// Selector for splitting records by the derived nap flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NapFilter {
    All,
    NapsOnly,
    FullSleepOnly,
}

/// Filter records by the nap flag
pub fn filter_by_nap(records: &[SleepRecord], filter: NapFilter) -> Vec<SleepRecord> {
    match filter {
        NapFilter::All => records.to_vec(),
        NapFilter::NapsOnly => records.iter().filter(|r| r.is_nap).cloned().collect(),
        NapFilter::FullSleepOnly => records.iter().filter(|r| !r.is_nap).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<SleepRecord> {
        vec![
            SleepRecord {
                sleep_score: 85.0,
                sleep_duration: Some(420.0),
                nap_score: 0.0,
                physical_recovery: Some(90.0),
                sleep_start_time: None,
                sleep_end_time: None,
                is_nap: false,
            },
            SleepRecord {
                sleep_score: 60.0,
                sleep_duration: Some(90.0),
                nap_score: 1.0,
                physical_recovery: None,
                sleep_start_time: None,
                sleep_end_time: None,
                is_nap: true,
            },
            SleepRecord {
                sleep_score: 92.0,
                sleep_duration: Some(480.0),
                nap_score: 0.0,
                physical_recovery: Some(95.0),
                sleep_start_time: None,
                sleep_end_time: None,
                is_nap: false,
            },
        ]
    }

    #[test]
    fn test_filter_by_nap() {
        let records = sample_records();

        let all = filter_by_nap(&records, NapFilter::All);
        assert_eq!(all.len(), 3);

        let naps = filter_by_nap(&records, NapFilter::NapsOnly);
        assert_eq!(naps.len(), 1);
        assert_eq!(naps[0].sleep_score, 60.0);

        let full_sleeps = filter_by_nap(&records, NapFilter::FullSleepOnly);
        assert_eq!(full_sleeps.len(), 2);
    }
}
