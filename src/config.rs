use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};
use crate::explorer::logic::{DEFAULT_MAX_BINS, DEFAULT_NULL_MARKERS, DEFAULT_TOP_N};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Rows kept in the most-frequent-values table (default: 20)
    pub top_n: usize,
    /// Upper bound on numeric histogram bins (default: 20)
    pub max_bins: usize,
    /// Rows shown in the dataset overview (default: 5)
    pub head_rows: usize,
    /// Rows the CSV reader inspects to infer column types
    pub infer_schema_length: usize,
    /// Declare ISO-like date columns as timestamps while loading
    pub try_parse_dates: bool,
    /// Read `01/02/2023` as 1 February rather than 2 January
    pub day_first: bool,
    /// Cell values read as missing
    pub null_markers: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            max_bins: DEFAULT_MAX_BINS,
            head_rows: 5,
            infer_schema_length: 10_000,
            try_parse_dates: false,
            day_first: true,
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|&m| m.to_owned()).collect(),
        }
    }
}

impl Settings {
    /// # Errors
    ///
    /// [`ExplorerError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(ExplorerError::Config("top_n must be at least 1".to_owned()));
        }
        if self.max_bins == 0 {
            return Err(ExplorerError::Config("max_bins must be at least 1".to_owned()));
        }
        if self.infer_schema_length == 0 {
            return Err(ExplorerError::Config(
                "infer_schema_length must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

pub fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("colscope")
        .join("config.json")
}

/// Settings from the standard location, or defaults when absent or unreadable.
pub fn load_settings() -> Settings {
    let path = get_config_path();
    match load_settings_from(&path) {
        Ok(settings) => settings,
        Err(e) => {
            if path.exists() {
                tracing::warn!("Ignoring settings at {}: {e}", path.display());
            }
            Settings::default()
        }
    }
}

/// # Errors
///
/// I/O or JSON errors, or settings that fail validation.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)?;
    settings.validate()?;
    Ok(settings)
}

/// # Errors
///
/// I/O errors creating the directory or writing the file.
pub fn save_settings(settings: &Settings) -> Result<PathBuf> {
    let path = get_config_path();
    save_settings_to(&path, settings)?;
    Ok(path)
}

/// # Errors
///
/// I/O errors creating the directory or writing the file.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}
