use crate::config::toml_config::TomlConfig;
use crate::config::{AttendanceOptions, Json2CsvOptions};
use crate::core::compliance::DEFAULT_COMPLIANCE_THRESHOLD;
use crate::core::json2csv::parse_column_list;
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::Validate;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

pub const ATTENDANCE_USAGE: &str = "Usage: attendance attendance.[json|csv] [yyyy-MM]";
pub const JSON2CSV_USAGE: &str = "Usage: json2csv [-columns col1,col2,col3] <inputfile>";

#[derive(Debug, Clone, Parser)]
#[command(name = "attendance")]
#[command(about = "Count office days in a month from an attendance file")]
pub struct AttendanceArgs {
    /// Attendance data file (.json or .csv)
    pub data_file: Option<PathBuf>,

    /// Target month as yyyy-MM (defaults to the current month)
    pub month: Option<String>,

    /// Also print business days and compliance status for the month
    #[arg(long)]
    pub summary: bool,

    /// Fraction of business days that must be office days
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Path to TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl AttendanceArgs {
    /// Merges command line values over the settings file. A missing data
    /// file yields `ToolError::Usage`.
    pub fn into_options(self, settings: Option<&TomlConfig>) -> Result<AttendanceOptions> {
        let data_file = self
            .data_file
            .or_else(|| settings.and_then(|s| s.data_file()).map(PathBuf::from))
            .ok_or_else(|| ToolError::Usage {
                usage: ATTENDANCE_USAGE.to_string(),
            })?;

        let threshold = self
            .threshold
            .or_else(|| settings.and_then(|s| s.compliance_threshold()))
            .unwrap_or(DEFAULT_COMPLIANCE_THRESHOLD);

        let options = AttendanceOptions {
            data_file,
            month: self.month,
            summary: self.summary,
            compliance_threshold: threshold,
        };
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "json2csv")]
#[command(about = "Convert a JSON array of objects to CSV")]
pub struct Json2CsvArgs {
    /// Comma-separated list of column names to specify order
    #[arg(short = 'c', long = "columns")]
    pub columns: Option<String>,

    /// JSON input file
    pub input: Option<PathBuf>,

    /// Path to TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl Json2CsvArgs {
    /// Parses arguments, accepting the single-dash `-columns` spelling.
    pub fn parse_from_env() -> Self {
        Self::parse_from(normalize_single_dash_flags(std::env::args_os(), &["columns"]))
    }

    pub fn into_options(self, settings: Option<&TomlConfig>) -> Result<Json2CsvOptions> {
        let input = self.input.ok_or_else(|| ToolError::Usage {
            usage: JSON2CSV_USAGE.to_string(),
        })?;

        let columns = match self.columns.as_deref() {
            Some(value) if !value.trim().is_empty() => Some(parse_column_list(value)),
            Some(_) => None,
            None => settings.and_then(|s| s.columns()).map(<[String]>::to_vec),
        };

        let options = Json2CsvOptions { input, columns };
        options.validate()?;
        Ok(options)
    }
}

/// Rewrites `-name` and `-name=value` into their `--` forms for the given
/// long flag names. Arguments after `--` are left alone.
pub fn normalize_single_dash_flags<I>(args: I, long_flags: &[&str]) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(Into::into)
        .map(|arg: OsString| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }

            let rewritten = text
                .strip_prefix('-')
                .filter(|rest| !rest.starts_with('-'))
                .and_then(|rest| {
                    let name = rest.split('=').next().unwrap_or(rest);
                    long_flags.contains(&name).then(|| format!("--{}", rest))
                });
            rewritten.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendance_args(argv: &[&str]) -> AttendanceArgs {
        AttendanceArgs::try_parse_from(argv).unwrap()
    }

    fn json2csv_args(argv: &[&str]) -> Json2CsvArgs {
        Json2CsvArgs::try_parse_from(normalize_single_dash_flags(argv.iter().copied(), &["columns"]))
            .unwrap()
    }

    #[test]
    fn test_attendance_positional_arguments() {
        let options = attendance_args(&["attendance", "data.csv", "2024-03"])
            .into_options(None)
            .unwrap();

        assert_eq!(options.data_file, PathBuf::from("data.csv"));
        assert_eq!(options.month.as_deref(), Some("2024-03"));
        assert!(!options.summary);
        assert_eq!(options.compliance_threshold, DEFAULT_COMPLIANCE_THRESHOLD);
    }

    #[test]
    fn test_attendance_missing_file_is_usage() {
        let err = attendance_args(&["attendance"]).into_options(None).unwrap_err();

        assert!(matches!(err, ToolError::Usage { .. }));
        assert_eq!(err.exit_code(), 0);
        assert_eq!(err.user_friendly_message(), ATTENDANCE_USAGE);
    }

    #[test]
    fn test_attendance_settings_fill_gaps() {
        let settings = TomlConfig::from_toml_str(
            "[attendance]\ndata_file = \"office.json\"\ncompliance_threshold = 0.4\n",
        )
        .unwrap();

        let options = attendance_args(&["attendance", "--summary"])
            .into_options(Some(&settings))
            .unwrap();
        assert_eq!(options.data_file, PathBuf::from("office.json"));
        assert_eq!(options.compliance_threshold, 0.4);

        let options = attendance_args(&["attendance", "mine.csv", "--threshold", "0.6"])
            .into_options(Some(&settings))
            .unwrap();
        assert_eq!(options.data_file, PathBuf::from("mine.csv"));
        assert_eq!(options.compliance_threshold, 0.6);
    }

    #[test]
    fn test_attendance_threshold_out_of_range() {
        let err = attendance_args(&["attendance", "a.csv", "--threshold", "2"])
            .into_options(None)
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_json2csv_single_dash_columns() {
        for argv in [
            vec!["json2csv", "-columns", "c, a", "in.json"],
            vec!["json2csv", "-columns=c, a", "in.json"],
            vec!["json2csv", "--columns", "c, a", "in.json"],
            vec!["json2csv", "-c", "c, a", "in.json"],
        ] {
            let options = json2csv_args(&argv).into_options(None).unwrap();
            assert_eq!(options.input, PathBuf::from("in.json"));
            assert_eq!(
                options.columns,
                Some(vec!["c".to_string(), "a".to_string()]),
                "{:?}",
                argv
            );
        }
    }

    #[test]
    fn test_json2csv_columns_from_settings() {
        let settings = TomlConfig::from_toml_str("[json2csv]\ncolumns = [\"id\"]\n").unwrap();

        let options = json2csv_args(&["json2csv", "in.json"])
            .into_options(Some(&settings))
            .unwrap();
        assert_eq!(options.columns, Some(vec!["id".to_string()]));

        let options = json2csv_args(&["json2csv", "-columns", "name", "in.json"])
            .into_options(Some(&settings))
            .unwrap();
        assert_eq!(options.columns, Some(vec!["name".to_string()]));
    }

    #[test]
    fn test_json2csv_missing_input_is_usage() {
        let err = json2csv_args(&["json2csv"]).into_options(None).unwrap_err();
        assert!(matches!(err, ToolError::Usage { .. }));
    }

    #[test]
    fn test_normalize_leaves_other_arguments() {
        let args = normalize_single_dash_flags(
            ["json2csv", "-v", "-columnsx", "--", "-columns"],
            &["columns"],
        );
        assert_eq!(args, vec!["json2csv", "-v", "-columnsx", "--", "-columns"]);
    }
}
