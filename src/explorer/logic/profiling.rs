//! Descriptive statistics for a selected column.
//!
//! Both profilers are pure functions of the column: the same column always
//! yields the same summary (the datetime profiler takes "now" as an input for
//! that reason). A column without any non-missing value yields a summary in
//! which every metric is `None`, which keeps "no data" apart from a metric
//! that is genuinely zero.

use chrono::{Datelike as _, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use polars::prelude::{ChunkAgg as _, ChunkQuantile as _, ChunkVar as _};

use super::types::{DateColumn, DateSummary, NumericColumn, NumericSummary, from_millis};

pub fn profile_numeric(column: &NumericColumn) -> NumericSummary {
    let present = column.non_missing();
    if present == 0 {
        tracing::debug!(column = %column.name, "Numeric column has no data");
        return NumericSummary::default();
    }

    let ca = &column.values;
    let unique = column.distinct();
    let zeros = column.iter().flatten().filter(|&v| v == 0.0).count();
    let negatives = column.iter().flatten().filter(|&v| v < 0.0).count();
    let std_dev = if present < 2 { None } else { ca.std(1) };

    let summary = NumericSummary {
        unique: Some(unique),
        missing: Some(ca.null_count()),
        zeros: Some(zeros),
        negatives: Some(negatives),
        mean: ca.mean(),
        std_dev,
        min: ca.min(),
        max: ca.max(),
        median: ca.median(),
    };
    tracing::debug!(column = %column.name, rows = column.len(), "Profiled numeric column");
    summary
}

fn nonzero(n: usize) -> Option<usize> {
    (n > 0).then_some(n)
}

fn sentinel(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN)
}

/// Profile a column that has already been converted to timestamps.
///
/// `now` is the moment "future" dates are measured against. Counting
/// metrics other than the unique count are reported as `None` when zero.
pub fn profile_datetime(column: &DateColumn, now: NaiveDateTime) -> DateSummary {
    let present: Vec<NaiveDateTime> = column.present().collect();
    if present.is_empty() {
        tracing::debug!(column = %column.name, "Date column has no data");
        return DateSummary::default();
    }

    let is_weekend = |ts: &NaiveDateTime| matches!(ts.weekday(), Weekday::Sat | Weekday::Sun);
    let weekend = present.iter().filter(|ts| is_weekend(ts)).count();
    let empty_1900 = sentinel(1900);
    let empty_1970 = sentinel(1970);

    let summary = DateSummary {
        unique: Some(column.distinct()),
        missing: nonzero(column.len() - present.len()),
        weekend: nonzero(weekend),
        weekday: nonzero(present.len() - weekend),
        future: nonzero(present.iter().filter(|&&ts| ts > now).count()),
        empty_1900: nonzero(present.iter().filter(|&&ts| ts == empty_1900).count()),
        empty_1970: nonzero(present.iter().filter(|&&ts| ts == empty_1970).count()),
        min: column.millis().min().and_then(from_millis),
        max: column.millis().max().and_then(from_millis),
    };
    tracing::debug!(column = %column.name, rows = column.len(), "Profiled date column");
    summary
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn test_numeric_example() {
        let col = NumericColumn::new(
            "n",
            vec![Some(1.0), Some(2.0), Some(2.0), Some(0.0), Some(-5.0), None],
        );
        let s = profile_numeric(&col);
        assert_eq!(s.unique, Some(4));
        assert_eq!(s.missing, Some(1));
        assert_eq!(s.zeros, Some(1));
        assert_eq!(s.negatives, Some(1));
        assert_eq!(s.mean, Some(0.0));
        assert_eq!(s.min, Some(-5.0));
        assert_eq!(s.max, Some(2.0));
        assert_eq!(s.median, Some(1.0));
        // sample variance: (1 + 4 + 4 + 0 + 25) / 4
        assert!((s.std_dev.unwrap() - 8.5_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_numeric_empty_is_all_none() {
        assert_eq!(profile_numeric(&NumericColumn::new("n", vec![])), NumericSummary::default());
        assert_eq!(
            profile_numeric(&NumericColumn::new("n", vec![None, None])),
            NumericSummary::default()
        );
    }

    #[test]
    fn test_std_dev_needs_two_values() {
        let s = profile_numeric(&NumericColumn::new("n", vec![Some(3.0), None]));
        assert_eq!(s.std_dev, None);
        assert_eq!(s.mean, Some(3.0));
    }

    #[test]
    fn test_zero_and_negative_zero_are_one_value() {
        let s = profile_numeric(&NumericColumn::new("n", vec![Some(0.0), Some(-0.0)]));
        assert_eq!(s.unique, Some(1));
        assert_eq!(s.zeros, Some(2));
        assert_eq!(s.negatives, Some(0));
    }

    #[test]
    fn test_datetime_metrics() {
        // 2023-02-04 is a Saturday, 2023-02-06 a Monday
        let col = DateColumn::new(
            "d",
            vec![
                Some(ts(2023, 2, 4)),
                Some(ts(2023, 2, 6)),
                Some(ts(1900, 1, 1)),
                Some(ts(2099, 1, 1)),
                None,
            ],
        );
        let s = profile_datetime(&col, ts(2024, 1, 1));
        assert_eq!(s.unique, Some(4));
        assert_eq!(s.missing, Some(1));
        assert_eq!(s.weekend, Some(1));
        assert_eq!(s.weekday, Some(3));
        assert_eq!(s.future, Some(1));
        assert_eq!(s.empty_1900, Some(1));
        assert_eq!(s.empty_1970, None);
        assert_eq!(s.min, Some(ts(1900, 1, 1)));
        assert_eq!(s.max, Some(ts(2099, 1, 1)));
    }

    #[test]
    fn test_datetime_zero_counts_are_none() {
        let col = DateColumn::new("d", vec![Some(ts(2023, 2, 6)), Some(ts(2023, 2, 6))]);
        let s = profile_datetime(&col, ts(2024, 1, 1));
        assert_eq!(s.unique, Some(1));
        assert_eq!(s.missing, None);
        assert_eq!(s.weekend, None);
        assert_eq!(s.weekday, Some(2));
        assert_eq!(s.future, None);
    }

    #[test]
    fn test_datetime_empty_is_all_none() {
        let col = DateColumn::new("d", vec![None]);
        assert_eq!(profile_datetime(&col, ts(2024, 1, 1)), DateSummary::default());
    }

    #[test]
    fn test_future_is_strictly_after_now() {
        let now = ts(2024, 1, 1);
        let col = DateColumn::new("d", vec![Some(now)]);
        assert_eq!(profile_datetime(&col, now).future, None);
    }
}
