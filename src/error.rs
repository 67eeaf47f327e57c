//! Error types for column exploration.
//!
//! Every fallible library operation returns [`Result<T>`], whose error is
//! [`ExplorerError`]. Variants map onto what the caller has to show the user:
//!
//! ```
//! use colscope::error::ExplorerError;
//!
//! fn describe(err: &ExplorerError) -> String {
//!     match err {
//!         ExplorerError::UploadMissing => "Please upload a CSV.".to_owned(),
//!         ExplorerError::ColumnNotFound(name) => format!("No column named '{name}'"),
//!         other => other.to_string(),
//!     }
//! }
//! # assert_eq!(describe(&ExplorerError::UploadMissing), "Please upload a CSV.");
//! ```
//!
//! An empty column is never an error: profiling reports `None` metrics and
//! empty tables instead.
//!
//! ## Context Extension Trait
//!
//! [`ResultExt`] adds `.context()` to any result whose error converts into
//! [`ExplorerError`]:
//!
//! ```no_run
//! use colscope::error::ResultExt as _;
//!
//! fn read_upload(path: &str) -> colscope::error::Result<Vec<u8>> {
//!     std::fs::read(path).context("Failed to read upload")
//! }
//! ```

use std::fmt;

/// Main error type for exploration operations.
#[derive(Debug)]
pub enum ExplorerError {
    /// A column operation was attempted before any file was uploaded.
    UploadMissing,

    /// The selected column is not part of the table.
    ColumnNotFound(String),

    /// A column could not be coerced to timestamps.
    DateParse(String),

    /// A numeric operation was requested on a non-numeric column.
    NotNumeric(String),

    /// CSV parsing or dataframe errors
    DataProcessing(String),

    /// I/O errors
    Io(std::io::Error),

    /// Configuration errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UploadMissing => write!(f, "Please upload a CSV."),
            Self::ColumnNotFound(name) => write!(f, "Column '{name}' not found in the table"),
            Self::DateParse(msg) => write!(f, "Failed to convert the column to datetime: {msg}"),
            Self::NotNumeric(name) => write!(f, "Column '{name}' is not numeric"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ExplorerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExplorerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for ExplorerError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for ExplorerError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for exploration operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ExplorerError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: ExplorerError = e.into();
            ExplorerError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: ExplorerError = e.into();
            ExplorerError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExplorerError::ColumnNotFound("price".to_owned());
        assert_eq!(err.to_string(), "Column 'price' not found in the table");
        assert_eq!(ExplorerError::UploadMissing.to_string(), "Please upload a CSV.");
    }

    #[test]
    fn test_date_parse_names_reason() {
        let err = ExplorerError::DateParse("row 3: 'soon' is not a date".to_owned());
        assert!(err.to_string().contains("'soon' is not a date"));
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "upload.csv",
        ));

        let result: Result<()> = result.context("Failed to read upload");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read upload")
        );
    }
}
