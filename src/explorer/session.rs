//! Per-upload exploration context.
//!
//! A [`Session`] owns the table of the current upload and the settings used to
//! explore it. Nothing is shared between sessions; serving several users means
//! one `Session` each.
//!
//! ```no_run
//! use colscope::config::Settings;
//! use colscope::explorer::Session;
//!
//! # fn main() -> colscope::error::Result<()> {
//! let mut session = Session::new(Settings::default());
//! session.upload(&std::fs::read("sales.csv")?)?;
//! for name in session.numeric_columns()? {
//!     let report = session.explore_numeric(&name)?;
//!     println!("{name}: {} bins", report.histogram.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use chrono::NaiveDateTime;

use super::logic::{
    self, Column, ColumnReport, ColumnSummary, DatasetOverview, LoadOptions, NumericColumn, Table,
};
use crate::config::Settings;
use crate::error::{ExplorerError, Result};

#[derive(Debug, Default)]
pub struct Session {
    settings: Settings,
    table: Option<Table>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            table: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Load an upload, replacing the previous table on success.
    ///
    /// # Errors
    ///
    /// Whatever the CSV loader rejects; the previous table is kept.
    pub fn upload(&mut self, bytes: &[u8]) -> Result<&Table> {
        let table = logic::load_csv_bytes(bytes, &LoadOptions::from(&self.settings))?;
        Ok(self.table.insert(table))
    }

    /// # Errors
    ///
    /// I/O errors, plus whatever [`Session::upload`] rejects.
    pub fn upload_path(&mut self, path: &Path) -> Result<&Table> {
        let table = logic::load_csv_path(path, &LoadOptions::from(&self.settings))?;
        Ok(self.table.insert(table))
    }

    pub fn clear(&mut self) {
        self.table = None;
    }

    /// # Errors
    ///
    /// [`ExplorerError::UploadMissing`] until a file has been uploaded.
    pub fn table(&self) -> Result<&Table> {
        self.table.as_ref().ok_or(ExplorerError::UploadMissing)
    }

    /// # Errors
    ///
    /// [`ExplorerError::UploadMissing`] until a file has been uploaded.
    pub fn overview(&self) -> Result<DatasetOverview> {
        self.table()?.overview(self.settings.head_rows)
    }

    /// # Errors
    ///
    /// [`ExplorerError::UploadMissing`] until a file has been uploaded.
    pub fn numeric_columns(&self) -> Result<Vec<String>> {
        Ok(logic::numeric_columns(self.table()?))
    }

    /// # Errors
    ///
    /// [`ExplorerError::UploadMissing`] until a file has been uploaded.
    pub fn date_columns(&self) -> Result<Vec<String>> {
        Ok(logic::date_candidates(self.table()?))
    }

    /// Summary, top values and histogram of a numeric column.
    ///
    /// # Errors
    ///
    /// `UploadMissing`, `ColumnNotFound`, or `NotNumeric` when the column
    /// holds values that are not numbers.
    pub fn explore_numeric(&self, name: &str) -> Result<ColumnReport> {
        let column = self.table()?.column(name)?;
        let numeric = to_numeric(&column)?;

        Ok(ColumnReport {
            column: name.to_owned(),
            kind: column.kind(),
            summary: ColumnSummary::Numeric(logic::profile_numeric(&numeric)),
            frequency: logic::top_values(&column, self.settings.top_n),
            histogram: logic::numeric_histogram(&numeric, self.settings.max_bins),
        })
    }

    /// Summary, top values and yearly bar chart of a date column, with
    /// "future" measured against the current local time.
    ///
    /// # Errors
    ///
    /// `UploadMissing`, `ColumnNotFound`, or `DateParse` when the column does
    /// not convert to timestamps.
    pub fn explore_date(&self, name: &str) -> Result<ColumnReport> {
        self.explore_date_at(name, chrono::Local::now().naive_local())
    }

    /// [`Session::explore_date`] with an explicit "now".
    ///
    /// # Errors
    ///
    /// See [`Session::explore_date`].
    pub fn explore_date_at(&self, name: &str, now: NaiveDateTime) -> Result<ColumnReport> {
        let column = self.table()?.column(name)?;
        let dates = logic::parse_date_column(&column, self.settings.day_first)?;
        let summary = ColumnSummary::Datetime(logic::profile_datetime(&dates, now));
        let histogram = logic::yearly_histogram(&dates);
        let frequency = logic::top_values(&Column::Datetime(dates), self.settings.top_n);

        Ok(ColumnReport {
            column: name.to_owned(),
            kind: column.kind(),
            summary,
            frequency,
            histogram,
        })
    }
}

/// Numeric view of a column; text columns convert when every value parses.
fn to_numeric(column: &Column) -> Result<NumericColumn> {
    match column {
        Column::Numeric(c) => Ok(c.clone()),
        Column::Text(c) => {
            let values = c
                .values
                .iter()
                .map(|v| match v {
                    Some(s) => s
                        .trim()
                        .parse::<f64>()
                        .map(Some)
                        .map_err(|_| ExplorerError::NotNumeric(c.name.clone())),
                    None => Ok(None),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(NumericColumn::new(&c.name, values))
        }
        Column::Datetime(c) => Err(ExplorerError::NotNumeric(c.name.clone())),
    }
}
