//! Column profiling pipeline.
//!
//! ```text
//! CSV bytes ──> io::load_csv_bytes ──> Table
//!                                        │
//!                 classify::numeric_columns / date_candidates
//!                                        │  (user picks a column)
//!                                        ▼
//!                                     Column ──┬─> profiling   ─> ColumnSummary
//!                                              ├─> frequency   ─> FrequencyTable
//!                                              └─> histogram   ─> HistogramBins
//! ```
//!
//! The three computations are independent pure functions of the selected
//! column; none of them keeps state between calls.

pub mod classify;
pub mod dates;
pub mod frequency;
pub mod histogram;
pub mod io;
pub mod profiling;
pub mod types;

pub use classify::{column_names, date_candidates, numeric_columns};
pub use dates::{parse_date_column, parse_datetime};
pub use frequency::{DEFAULT_TOP_N, top_values};
pub use histogram::{DEFAULT_MAX_BINS, numeric_histogram, yearly_histogram};
pub use io::{DEFAULT_NULL_MARKERS, LoadOptions, load_csv_bytes, load_csv_path};
pub use profiling::{profile_datetime, profile_numeric};
pub use types::{
    Column, ColumnKind, ColumnReport, ColumnSummary, DateColumn, DateSummary, DatasetOverview,
    FrequencyRow, FrequencyTable, HistogramBin, HistogramBins, NumericColumn, NumericSummary,
    SummaryRow, Table, TextColumn,
};
