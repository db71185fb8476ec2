#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::compliance::DEFAULT_COMPLIANCE_THRESHOLD;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use std::path::PathBuf;

/// Fully resolved settings for one attendance count.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceOptions {
    pub data_file: PathBuf,
    /// Raw `yyyy-MM` argument; `None` means the current month.
    pub month: Option<String>,
    pub summary: bool,
    pub compliance_threshold: f64,
}

impl AttendanceOptions {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            month: None,
            summary: false,
            compliance_threshold: DEFAULT_COMPLIANCE_THRESHOLD,
        }
    }

    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn with_summary(mut self, threshold: f64) -> Self {
        self.summary = true;
        self.compliance_threshold = threshold;
        self
    }
}

impl Validate for AttendanceOptions {
    fn validate(&self) -> Result<()> {
        validate_path("data_file", &self.data_file.to_string_lossy())?;
        validate_range("compliance_threshold", self.compliance_threshold, 0.0, 1.0)
    }
}

/// Fully resolved settings for one JSON to CSV conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Json2CsvOptions {
    pub input: PathBuf,
    pub columns: Option<Vec<String>>,
}

impl Json2CsvOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            columns: None,
        }
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}

impl Validate for Json2CsvOptions {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input.to_string_lossy())?;
        for column in self.columns.as_deref().unwrap_or_default() {
            validate_non_empty_string("columns", column)?;
        }
        Ok(())
    }
}
