use std::io::Cursor;
use std::path::Path;

use polars::prelude::{
    CsvParseOptions, CsvReadOptions, DataFrame, NullValues, PolarsResult, SerReader as _,
};

use super::types::Table;
use crate::config::Settings;
use crate::error::{ExplorerError, Result, ResultExt as _};

/// Cell values read as missing in every column.
pub const DEFAULT_NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A",
];

#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub infer_schema_length: usize,
    pub try_parse_dates: bool,
    pub null_markers: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            infer_schema_length: 10_000,
            try_parse_dates: false,
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|&m| m.to_owned()).collect(),
        }
    }
}

impl From<&Settings> for LoadOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            infer_schema_length: settings.infer_schema_length,
            try_parse_dates: settings.try_parse_dates,
            null_markers: settings.null_markers.clone(),
        }
    }
}

/// Parse an uploaded CSV (header row, comma-delimited, UTF-8) into a table.
///
/// # Errors
///
/// Returns a data processing error for empty input or input the CSV reader
/// rejects.
pub fn load_csv_bytes(bytes: &[u8], options: &LoadOptions) -> Result<Table> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ExplorerError::DataProcessing(
            "the uploaded CSV is empty".to_owned(),
        ));
    }

    let df = match read_csv(bytes, options, Some(options.infer_schema_length)) {
        Ok(df) => df,
        Err(e) => {
            // a late cell may not fit the sampled schema
            tracing::debug!(
                "Schema from the first {} rows did not fit ({e}), scanning the whole file",
                options.infer_schema_length
            );
            read_csv(bytes, options, None)
                .map_err(|e| ExplorerError::DataProcessing(format!("Failed to read CSV: {e}")))?
        }
    };

    tracing::info!(
        rows = df.height(),
        columns = df.width(),
        "Loaded CSV upload"
    );
    Ok(Table::new(df))
}

fn read_csv(
    bytes: &[u8],
    options: &LoadOptions,
    infer_schema_length: Option<usize>,
) -> PolarsResult<DataFrame> {
    let null_values = NullValues::AllColumns(
        options
            .null_markers
            .iter()
            .map(|m| m.as_str().into())
            .collect(),
    );

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(b',')
                .with_try_parse_dates(options.try_parse_dates)
                .with_null_values(Some(null_values)),
        )
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
}

/// Read a CSV file from disk and load it like an upload.
///
/// # Errors
///
/// I/O errors reading the file, plus everything [`load_csv_bytes`] rejects.
pub fn load_csv_path(path: &Path, options: &LoadOptions) -> Result<Table> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    load_csv_bytes(&bytes, options)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;
    use crate::explorer::logic::types::ColumnKind;

    #[test]
    fn test_load_infers_kinds() {
        let csv = b"id,name,price,when\n1,apple,1.5,01/02/2023\n2,pear,NA,15/06/2022\n";
        let table = load_csv_bytes(csv, &LoadOptions::default()).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 4);
        assert_eq!(table.kind_of("id"), Some(ColumnKind::Numeric));
        assert_eq!(table.kind_of("name"), Some(ColumnKind::Text));
        assert_eq!(table.kind_of("price"), Some(ColumnKind::Numeric));
        assert_eq!(table.kind_of("when"), Some(ColumnKind::Text));
    }

    #[test]
    fn test_null_markers_are_missing() {
        let csv = b"price,qty\n1.5,1\nNA,2\n,3\n2.5,4\n";
        let table = load_csv_bytes(csv, &LoadOptions::default()).unwrap();
        assert_eq!(table.kind_of("price"), Some(ColumnKind::Numeric));
        let col = table.column("price").unwrap();
        assert_eq!(col.len(), 4);
        assert_eq!(col.display_values().iter().filter(|v| v.is_none()).count(), 2);
    }

    #[test]
    fn test_try_parse_dates_declares_timestamps() {
        let csv = b"when\n2023-02-01\n2022-06-15\n";
        let options = LoadOptions {
            try_parse_dates: true,
            ..LoadOptions::default()
        };
        let table = load_csv_bytes(csv, &options).unwrap();
        assert_eq!(table.kind_of("when"), Some(ColumnKind::Datetime));
    }

    #[test]
    fn test_text_after_inference_window_loads_as_text() {
        let mut csv = String::from("v\n");
        csv.push_str(&"1\n".repeat(10_001));
        csv.push_str("abc\n");
        let table = load_csv_bytes(csv.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(table.row_count(), 10_002);
        assert_eq!(table.kind_of("v"), Some(ColumnKind::Text));
    }

    #[test]
    fn test_late_float_widens_integer_column() {
        let options = LoadOptions {
            infer_schema_length: 2,
            ..LoadOptions::default()
        };
        let table = load_csv_bytes(b"v\n1\n2\n3\n4.5\n", &options).unwrap();
        assert_eq!(table.kind_of("v"), Some(ColumnKind::Numeric));
        let values = table.column("v").unwrap().display_values();
        assert_eq!(values.last().unwrap().as_deref(), Some("4.5"));
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        let err = load_csv_bytes(b"  \n", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, ExplorerError::DataProcessing(_)));
    }
}
