use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles"));

/// Optional settings file shared by both tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub attendance: Option<AttendanceSection>,
    pub json2csv: Option<Json2CsvSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttendanceSection {
    pub data_file: Option<String>,
    pub compliance_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Json2CsvSection {
    pub columns: Option<Vec<String>>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ToolError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ToolError::ConfigError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未定義的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn data_file(&self) -> Option<&str> {
        self.attendance.as_ref().and_then(|a| a.data_file.as_deref())
    }

    pub fn compliance_threshold(&self) -> Option<f64> {
        self.attendance.as_ref().and_then(|a| a.compliance_threshold)
    }

    pub fn columns(&self) -> Option<&[String]> {
        self.json2csv.as_ref().and_then(|j| j.columns.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = self.data_file() {
            validate_path("attendance.data_file", path)?;
        }

        if let Some(threshold) = self.compliance_threshold() {
            validate_range("attendance.compliance_threshold", threshold, 0.0, 1.0)?;
        }

        for column in self.columns().unwrap_or_default() {
            validate_non_empty_string("json2csv.columns", column)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[attendance]
data_file = "attendance.csv"
compliance_threshold = 0.6

[json2csv]
columns = ["id", "name"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_file(), Some("attendance.csv"));
        assert_eq!(config.compliance_threshold(), Some(0.6));
        assert_eq!(config.columns().unwrap(), ["id".to_string(), "name".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.data_file().is_none());
        assert!(config.columns().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ATTENDANCE_TOOLS_TEST_DIR", "/tmp/office");

        let toml_content = r#"
[attendance]
data_file = "${ATTENDANCE_TOOLS_TEST_DIR}/attendance.json"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_file(), Some("/tmp/office/attendance.json"));

        std::env::remove_var("ATTENDANCE_TOOLS_TEST_DIR");

        let config =
            TomlConfig::from_toml_str("[attendance]\ndata_file = \"${ATTENDANCE_TOOLS_UNSET}\"")
                .unwrap();
        assert_eq!(config.data_file(), Some("${ATTENDANCE_TOOLS_UNSET}"));
    }

    #[test]
    fn test_config_validation() {
        let config =
            TomlConfig::from_toml_str("[attendance]\ncompliance_threshold = 1.5\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[json2csv]\ncolumns = [\"id\", \" \"]\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = TomlConfig::from_toml_str("[attendance]\nthreshold = 0.5\n").unwrap_err();
        assert!(matches!(err, ToolError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[attendance]\ncompliance_threshold = 0.4\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.compliance_threshold(), Some(0.4));
    }
}
