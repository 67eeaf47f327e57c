use chrono::{NaiveDateTime, NaiveTime};
use polars::prelude::{
    DataFrame, DataType, DatetimeChunked, Float64Chunked, Int64Chunked, IntoSeries as _,
    NewChunkedArray as _, TimeUnit,
};
use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};
use crate::utils::{fmt_number, fmt_opt, fmt_opt_count, fmt_opt_timestamp};

/// Declared kind of a table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ColumnKind {
    Numeric,
    Datetime,
    Text,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "Numeric",
            Self::Datetime => "Datetime",
            Self::Text => "Text",
        }
    }

    /// Kind a polars column of this dtype is exposed as.
    ///
    /// A column with no values at all has no inferable type; it is treated as
    /// numeric so that it profiles as "no data" instead of joining the
    /// textual date candidates.
    pub fn from_dtype(dtype: &DataType, all_missing: bool) -> Self {
        if dtype.is_primitive_numeric() || *dtype == DataType::Null {
            Self::Numeric
        } else if matches!(dtype, DataType::Date | DataType::Datetime(_, _)) {
            Self::Datetime
        } else if all_missing && *dtype == DataType::String {
            Self::Numeric
        } else {
            Self::Text
        }
    }
}

/// Immutable in-memory table created from one upload.
///
/// All columns share the same row count; the table is never mutated after
/// loading and is shared by reference between computations.
#[derive(Clone, Debug)]
pub struct Table {
    df: DataFrame,
}

impl Table {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_count(&self) -> usize {
        self.df.width()
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Column names paired with their kind, in table order.
    pub fn schema(&self) -> Vec<(String, ColumnKind)> {
        self.df
            .get_columns()
            .iter()
            .map(|col| {
                let all_missing = col.len() > 0 && col.null_count() == col.len();
                (
                    col.name().to_string(),
                    ColumnKind::from_dtype(col.dtype(), all_missing),
                )
            })
            .collect()
    }

    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.schema()
            .into_iter()
            .find(|(col, _)| col == name)
            .map(|(_, kind)| kind)
    }

    /// Extract one column with values typed according to its kind.
    ///
    /// # Errors
    ///
    /// [`ExplorerError::ColumnNotFound`] if no column has this name, or a
    /// data processing error if the column cannot be cast.
    pub fn column(&self, name: &str) -> Result<Column> {
        let kind = self
            .kind_of(name)
            .ok_or_else(|| ExplorerError::ColumnNotFound(name.to_owned()))?;
        let series = self.df.column(name)?.as_materialized_series();

        let column = match kind {
            ColumnKind::Numeric => {
                let casted = series.cast(&DataType::Float64)?;
                let values = casted
                    .f64()?
                    .into_iter()
                    .map(|v| v.filter(|x| !x.is_nan()))
                    .collect::<Vec<_>>();
                Column::Numeric(NumericColumn::new(name, values))
            }
            ColumnKind::Datetime => {
                let casted = series.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
                Column::Datetime(DateColumn {
                    name: name.to_owned(),
                    values: casted.datetime()?.clone(),
                })
            }
            ColumnKind::Text => {
                let casted = series.cast(&DataType::String)?;
                let values = casted
                    .str()?
                    .into_iter()
                    .map(|v| v.map(|s| s.to_owned()))
                    .collect();
                Column::Text(TextColumn::new(name, values))
            }
        };
        Ok(column)
    }

    /// Shape, schema and the first `head_rows` rows rendered as strings.
    ///
    /// # Errors
    ///
    /// Fails only if a column cannot be rendered as text.
    pub fn overview(&self, head_rows: usize) -> Result<DatasetOverview> {
        let rows = head_rows.min(self.row_count());
        let mut head = vec![Vec::with_capacity(self.column_count()); rows];

        for col in self.df.get_columns() {
            let rendered = col
                .as_materialized_series()
                .head(Some(rows))
                .cast(&DataType::String)?;
            let ca = rendered.str()?;
            for (row, value) in head.iter_mut().zip(ca.into_iter()) {
                row.push(value.unwrap_or_default().to_owned());
            }
        }

        Ok(DatasetOverview {
            row_count: self.row_count(),
            column_count: self.column_count(),
            columns: self.schema(),
            head,
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DatasetOverview {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<(String, ColumnKind)>,
    pub head: Vec<Vec<String>>,
}

/// A single column with typed, nullable values.
#[derive(Clone, Debug)]
pub enum Column {
    Numeric(NumericColumn),
    Datetime(DateColumn),
    Text(TextColumn),
}

impl Column {
    pub fn name(&self) -> &str {
        match self {
            Self::Numeric(c) => &c.name,
            Self::Datetime(c) => &c.name,
            Self::Text(c) => &c.name,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Numeric(_) => ColumnKind::Numeric,
            Self::Datetime(_) => ColumnKind::Datetime,
            Self::Text(_) => ColumnKind::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(c) => c.len(),
            Self::Datetime(c) => c.len(),
            Self::Text(c) => c.values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values rendered the way they are shown in frequency tables.
    pub fn display_values(&self) -> Vec<Option<String>> {
        match self {
            Self::Numeric(c) => c.iter().map(|v| v.map(fmt_number)).collect(),
            Self::Datetime(c) => c.iter().map(|v| v.map(|ts| fmt_timestamp(&ts))).collect(),
            Self::Text(c) => c.values.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NumericColumn {
    pub name: String,
    pub values: Float64Chunked,
}

impl NumericColumn {
    /// `-0.0` is stored as `0.0` so that both count as one value.
    pub fn new(name: &str, values: Vec<Option<f64>>) -> Self {
        // -0.0 + 0.0 is +0.0
        let values = values.into_iter().map(|v| v.map(|x| x + 0.0));
        Self {
            name: name.to_owned(),
            values: Float64Chunked::from_iter_options(name.into(), values),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn non_missing(&self) -> usize {
        self.values.len() - self.values.null_count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        (&self.values).into_iter()
    }

    /// Number of distinct non-missing values.
    pub fn distinct(&self) -> usize {
        self.values
            .clone()
            .into_series()
            .drop_nulls()
            .n_unique()
            .unwrap_or(0)
    }
}

/// Timestamps stored as milliseconds since the epoch, without a time zone.
#[derive(Clone)]
pub struct DateColumn {
    pub name: String,
    pub values: DatetimeChunked,
}

// `DatetimeChunked` has no `Debug` impl; show its physical millisecond values.
impl std::fmt::Debug for DateColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateColumn")
            .field("name", &self.name)
            .field("values", self.values.physical())
            .finish()
    }
}

impl DateColumn {
    pub fn new(name: &str, values: Vec<Option<NaiveDateTime>>) -> Self {
        let millis = values
            .into_iter()
            .map(|v| v.map(|ts| ts.and_utc().timestamp_millis()));
        Self {
            name: name.to_owned(),
            values: Int64Chunked::from_iter_options(name.into(), millis)
                .into_datetime(TimeUnit::Milliseconds, None),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn non_missing(&self) -> usize {
        self.values.len() - self.values.null_count()
    }

    /// Physical millisecond values.
    pub fn millis(&self) -> &Int64Chunked {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<NaiveDateTime>> + '_ {
        self.millis().into_iter().map(|v| v.and_then(from_millis))
    }

    pub fn present(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.iter().flatten()
    }

    /// Number of distinct non-missing timestamps.
    pub fn distinct(&self) -> usize {
        self.values
            .clone()
            .into_series()
            .drop_nulls()
            .n_unique()
            .unwrap_or(0)
    }
}

pub fn from_millis(ms: i64) -> Option<NaiveDateTime> {
    chrono::DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
}

#[derive(Clone, Debug)]
pub struct TextColumn {
    pub name: String,
    pub values: Vec<Option<String>>,
}

impl TextColumn {
    pub fn new(name: &str, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.to_owned(),
            values,
        }
    }
}

/// Dates at midnight render without a time part.
pub fn fmt_timestamp(ts: &NaiveDateTime) -> String {
    if ts.time() == NaiveTime::MIN {
        ts.format("%Y-%m-%d").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

// SUMMARIES

/// Descriptive statistics of a numeric column.
///
/// Every field is `None` when the column has no non-missing values.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NumericSummary {
    pub unique: Option<usize>,
    pub missing: Option<usize>,
    pub zeros: Option<usize>,
    pub negatives: Option<usize>,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
}

/// Descriptive statistics of a datetime column.
///
/// Every field is `None` when the column has no non-missing values. The
/// counting metrics other than `unique` are also `None` when they are zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DateSummary {
    pub unique: Option<usize>,
    pub missing: Option<usize>,
    pub weekend: Option<usize>,
    pub weekday: Option<usize>,
    pub future: Option<usize>,
    pub empty_1900: Option<usize>,
    pub empty_1970: Option<usize>,
    pub min: Option<NaiveDateTime>,
    pub max: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Datetime(DateSummary),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

impl SummaryRow {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_owned(),
            value,
        }
    }
}

impl ColumnSummary {
    /// Ordered (label, value) pairs for display.
    pub fn rows(&self) -> Vec<SummaryRow> {
        match self {
            Self::Numeric(s) => vec![
                SummaryRow::new("Number of Unique Values", fmt_opt_count(s.unique)),
                SummaryRow::new("Number of Rows with Missing Values", fmt_opt_count(s.missing)),
                SummaryRow::new("Number of Rows with 0", fmt_opt_count(s.zeros)),
                SummaryRow::new("Number of Rows with Negative Values", fmt_opt_count(s.negatives)),
                SummaryRow::new("Average Value", fmt_opt(s.mean)),
                SummaryRow::new("Standard Deviation Value", fmt_opt(s.std_dev)),
                SummaryRow::new("Minimum Value", fmt_opt(s.min)),
                SummaryRow::new("Maximum Value", fmt_opt(s.max)),
                SummaryRow::new("Median Value", fmt_opt(s.median)),
            ],
            Self::Datetime(s) => vec![
                SummaryRow::new("Number of Unique Values", fmt_opt_count(s.unique)),
                SummaryRow::new("Number of Rows with Missing Values", fmt_opt_count(s.missing)),
                SummaryRow::new("Number of Weekend Dates", fmt_opt_count(s.weekend)),
                SummaryRow::new("Number of Weekday Dates", fmt_opt_count(s.weekday)),
                SummaryRow::new("Number of Dates in Future", fmt_opt_count(s.future)),
                SummaryRow::new("Number of Rows with 1900-01-01", fmt_opt_count(s.empty_1900)),
                SummaryRow::new("Number of Rows with 1970-01-01", fmt_opt_count(s.empty_1970)),
                SummaryRow::new("Minimum Value", fmt_opt_timestamp(s.min.as_ref())),
                SummaryRow::new("Maximum Value", fmt_opt_timestamp(s.max.as_ref())),
            ],
        }
    }
}

// FREQUENCIES AND HISTOGRAMS

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrequencyRow {
    pub value: String,
    pub occurrence: usize,
    /// Share of non-missing rows, a fraction in `[0, 1]` rounded to 4 decimals.
    ///
    /// Each share is off by at most `0.00005` after rounding, so the shares of
    /// `n` rows can add up to as much as `1 + n * 0.00005`.
    pub percentage: f64,
}

pub type FrequencyTable = Vec<FrequencyRow>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

pub type HistogramBins = Vec<HistogramBin>;

/// Everything shown for one selected column.
#[derive(Clone, Debug, Serialize)]
pub struct ColumnReport {
    pub column: String,
    pub kind: ColumnKind,
    pub summary: ColumnSummary,
    pub frequency: FrequencyTable,
    pub histogram: HistogramBins,
}

impl ColumnReport {
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.summary.rows()
    }
}
