use std::collections::BTreeMap;

use chrono::Datelike as _;
use polars::prelude::ChunkAgg as _;

use super::types::{DateColumn, HistogramBin, HistogramBins, NumericColumn};
use crate::utils::{fmt_bound, fmt_number};

pub const DEFAULT_MAX_BINS: usize = 20;

/// Equal-width bins spanning the observed range of a numeric column.
///
/// Uses `max_bins` bins, or fewer when the column has fewer distinct values.
/// Every non-missing value lands in exactly one bin; the last bin is closed
/// so that the maximum is counted. An empty column gives no bins.
pub fn numeric_histogram(column: &NumericColumn, max_bins: usize) -> HistogramBins {
    let (Some(min_v), Some(max_v)) = (column.values.min(), column.values.max()) else {
        return Vec::new();
    };

    let values: Vec<f64> = column.iter().flatten().collect();
    let distinct = column.distinct();
    if distinct <= 1 {
        return vec![HistogramBin {
            label: format!("[{}, {}]", fmt_bound(min_v), fmt_bound(max_v)),
            start: min_v,
            end: max_v,
            count: values.len(),
        }];
    }

    let num_bins = max_bins.min(distinct).max(1);
    let bin_width = (max_v - min_v) / num_bins as f64;

    let mut bins = vec![0_usize; num_bins];
    for val in &values {
        let bin_idx = (((val - min_v) / bin_width).floor() as usize).min(num_bins - 1);
        if let Some(bin) = bins.get_mut(bin_idx) {
            *bin += 1;
        }
    }

    let histogram: HistogramBins = bins
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = min_v + i as f64 * bin_width;
            let last = i + 1 == num_bins;
            let end = if last { max_v } else { min_v + (i + 1) as f64 * bin_width };
            let close = if last { ']' } else { ')' };
            HistogramBin {
                label: format!("[{}, {}{close}", fmt_bound(start), fmt_bound(end)),
                start,
                end,
                count,
            }
        })
        .collect();

    tracing::debug!(
        column = %column.name,
        bins = num_bins,
        width = %fmt_number(bin_width),
        "Binned numeric column"
    );
    histogram
}

/// One bucket per calendar year present, in ascending year order.
pub fn yearly_histogram(column: &DateColumn) -> HistogramBins {
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    for ts in column.present() {
        *years.entry(ts.year()).or_insert(0) += 1;
    }

    years
        .into_iter()
        .map(|(year, count)| HistogramBin {
            label: year.to_string(),
            start: f64::from(year),
            end: f64::from(year + 1),
            count,
        })
        .collect()
}
