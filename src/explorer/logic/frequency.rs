use std::collections::HashMap;

use super::types::{Column, FrequencyRow, FrequencyTable};

pub const DEFAULT_TOP_N: usize = 20;

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Most frequent non-missing values of a column.
///
/// Rows are sorted by occurrence, descending; equal counts keep the order in
/// which the values first appear. The share of each value is relative to the
/// non-missing rows only. An empty column gives an empty table.
pub fn top_values(column: &Column, top_n: usize) -> FrequencyTable {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for value in column.display_values().into_iter().flatten() {
        match index.get(&value) {
            Some(&i) => {
                if let Some(entry) = counts.get_mut(i) {
                    entry.1 += 1;
                }
            }
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Vec::new();
    }

    // stable: ties stay in first-occurrence order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top_n);

    tracing::debug!(column = column.name(), distinct = index.len(), "Ranked values");
    counts
        .into_iter()
        .map(|(value, occurrence)| FrequencyRow {
            value,
            occurrence,
            percentage: round4(occurrence as f64 / total as f64),
        })
        .collect()
}
