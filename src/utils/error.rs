use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{usage}")]
    Usage { usage: String },

    #[error("Invalid {field} argument '{value}': {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unsupported file format: {extension}. Use .json or .csv")]
    UnsupportedFormat { extension: String },

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("Invalid config value for {field} '{value}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid record at row {row}: {message}")]
    RecordError { row: usize, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Argument,
    Io,
    Format,
    Record,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 可恢復，處理繼續
    Low,
    /// 使用者輸入錯誤
    Medium,
    /// 無法讀取或解析輸入
    High,
}

impl ToolError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ToolError::Usage { .. } => ErrorCategory::Usage,
            ToolError::InvalidArgument { .. }
            | ToolError::ConfigError { .. }
            | ToolError::InvalidConfigValueError { .. } => ErrorCategory::Argument,
            ToolError::IoError(_) => ErrorCategory::Io,
            ToolError::UnsupportedFormat { .. }
            | ToolError::JsonError(_)
            | ToolError::CsvError(_) => ErrorCategory::Format,
            ToolError::RecordError { .. } => ErrorCategory::Record,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Usage | ErrorCategory::Record => ErrorSeverity::Low,
            ErrorCategory::Argument => ErrorSeverity::Medium,
            ErrorCategory::Io | ErrorCategory::Format => ErrorSeverity::High,
        }
    }

    /// Process exit status for an error that reached an entry point.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ToolError::Usage { .. } => "Pass the input file as the first argument".to_string(),
            ToolError::InvalidArgument { field, .. } if field == "month" => {
                "Use the yyyy-MM format, for example 2024-03".to_string()
            }
            ToolError::InvalidArgument { .. } => "Check the command line arguments".to_string(),
            ToolError::IoError(_) => "Make sure the file exists and is readable".to_string(),
            ToolError::UnsupportedFormat { .. } => {
                "Rename the file with a .json or .csv extension".to_string()
            }
            ToolError::JsonError(_) => {
                "Make sure the file contains a valid JSON array of objects".to_string()
            }
            ToolError::CsvError(_) => "Make sure the file is valid comma separated text".to_string(),
            ToolError::ConfigError { .. } | ToolError::InvalidConfigValueError { .. } => {
                "Fix the settings file or remove the offending key".to_string()
            }
            ToolError::RecordError { .. } => "Fix or remove the offending row".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ToolError::Usage { usage } => usage.clone(),
            ToolError::IoError(e) => format!("Error loading data: {}", e),
            ToolError::JsonError(e) => format!("Error parsing JSON: {}", e),
            other => other.to_string(),
        }
    }

    pub fn invalid_month(value: &str, reason: impl Into<String>) -> Self {
        ToolError::InvalidArgument {
            field: "month".to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_follow_taxonomy() {
        let usage = ToolError::Usage {
            usage: "Usage: attendance <file>".to_string(),
        };
        assert_eq!(usage.category(), ErrorCategory::Usage);
        assert_eq!(usage.exit_code(), 0);

        let month = ToolError::invalid_month("2024-13", "month out of range");
        assert_eq!(month.category(), ErrorCategory::Argument);
        assert_ne!(month.exit_code(), 0);

        let format = ToolError::UnsupportedFormat {
            extension: ".txt".to_string(),
        };
        assert_eq!(format.category(), ErrorCategory::Format);
        assert_eq!(format.exit_code(), 1);

        let io = ToolError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_month_suggestion_mentions_format() {
        let err = ToolError::invalid_month("January", "expected yyyy-MM");
        assert!(err.recovery_suggestion().contains("yyyy-MM"));
        assert!(err.to_string().contains("January"));
    }
}
