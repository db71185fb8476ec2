use crate::domain::model::AttendanceRecord;
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::validate_file_extension;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const CSV_HEADER_TOKEN: &str = "Date";
const CSV_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceFormat {
    Json,
    Csv,
}

impl AttendanceFormat {
    /// 依副檔名判斷格式（不分大小寫）
    pub fn from_path(path: &Path) -> Result<Self> {
        match validate_file_extension(path, &[".json", ".csv"])?.as_str() {
            ".json" => Ok(AttendanceFormat::Json),
            _ => Ok(AttendanceFormat::Csv),
        }
    }
}

/// Loads attendance records from a `.json` or `.csv` file.
///
/// The format check runs before the file is opened, so an unsupported
/// extension is reported even when the path does not exist.
pub fn load_attendance(path: &Path) -> Result<Vec<AttendanceRecord>> {
    let format = AttendanceFormat::from_path(path)?;
    tracing::debug!("Loading {:?} attendance data from {}", format, path.display());

    let reader = BufReader::new(File::open(path)?);
    let records = match format {
        AttendanceFormat::Json => read_json_records(reader)?,
        AttendanceFormat::Csv => read_csv_records(reader)?,
    };

    tracing::debug!("Loaded {} attendance records", records.len());
    Ok(records)
}

/// A top-level `null` reads as no records.
pub fn read_json_records<R: Read>(reader: R) -> Result<Vec<AttendanceRecord>> {
    let records: Option<Vec<AttendanceRecord>> = serde_json::from_reader(reader)?;
    Ok(records.unwrap_or_default())
}

/// Reads `Date,IsOffice,IsDayOff` rows. Rows with the wrong column count,
/// an unparseable flag or invalid UTF-8 are skipped with a warning; the date
/// column is kept as-is. Only read failures abort.
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<AttendanceRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();

    for (index, row) in csv_reader.byte_records().enumerate() {
        let row_number = index + 1;
        let row = match csv::StringRecord::from_byte_record(row?) {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Warning: row {}: {}", row_number, e.utf8_error());
                continue;
            }
        };

        if index == 0 && is_header_row(&row) {
            tracing::debug!("Skipping CSV header row");
            continue;
        }

        match parse_csv_row(&row, row_number) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("Warning: {}", e),
        }
    }

    Ok(records)
}

fn is_header_row(row: &csv::StringRecord) -> bool {
    row.get(0)
        .map(|cell| cell.trim_start_matches('\u{feff}') == CSV_HEADER_TOKEN)
        .unwrap_or(false)
}

fn parse_csv_row(row: &csv::StringRecord, row_number: usize) -> Result<AttendanceRecord> {
    if row.len() != CSV_COLUMNS {
        return Err(ToolError::RecordError {
            row: row_number,
            message: format!("expected {} columns, found {}", CSV_COLUMNS, row.len()),
        });
    }

    let is_office = parse_flag(&row[1], "IsOffice", row_number)?;
    let is_day_off = parse_flag(&row[2], "IsDayOff", row_number)?;

    Ok(AttendanceRecord::new(&row[0], is_office, is_day_off))
}

fn parse_flag(value: &str, column: &str, row_number: usize) -> Result<bool> {
    parse_bool(value).ok_or_else(|| ToolError::RecordError {
        row: row_number,
        message: format!("invalid {} value {}", column, value),
    })
}

/// Strict boolean literal parser: `1 t T TRUE true True` and
/// `0 f F FALSE false False`. Surrounding whitespace is not accepted.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
