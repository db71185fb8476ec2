use crate::domain::model::GenericRecord;
use crate::utils::error::Result;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

pub fn load_generic_records(path: &Path) -> Result<Vec<GenericRecord>> {
    tracing::debug!("Reading JSON records from {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    read_generic_records(reader)
}

/// A top-level `null` reads as an empty array and a `null` element as a
/// record without keys.
pub fn read_generic_records<R: Read>(reader: R) -> Result<Vec<GenericRecord>> {
    let records: Option<Vec<GenericRecord>> = serde_json::from_reader(reader)?;
    Ok(records.unwrap_or_default())
}

/// Splits a `-columns` value on commas and trims each entry. Blank entries
/// are dropped.
pub fn parse_column_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|col| !col.is_empty())
        .map(str::to_string)
        .collect()
}

/// Output column order, taken from the first record's keys.
///
/// Requested columns that exist come first, in the requested order and
/// without repeats; the remaining keys follow sorted ordinally. Without a
/// request every key is sorted.
pub fn resolve_columns(records: &[GenericRecord], requested: Option<&[String]>) -> Vec<String> {
    let Some(first) = records.first() else {
        return Vec::new();
    };

    let mut remaining: Vec<&str> = first.keys().collect();
    let mut columns = Vec::with_capacity(remaining.len());

    for col in requested.unwrap_or_default() {
        if let Some(pos) = remaining.iter().position(|key| *key == col.as_str()) {
            columns.push(remaining.remove(pos).to_string());
        } else {
            tracing::debug!("Column {} not present in data, ignoring", col);
        }
    }

    remaining.sort_unstable();
    columns.extend(remaining.into_iter().map(str::to_string));
    columns
}

/// Writes a header row and one row per record. Absent and null values
/// become empty cells. Nothing is written when there are no columns.
pub fn write_csv<W: Write>(out: W, columns: &[String], records: &[GenericRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    if columns.is_empty() {
        writer.flush()?;
        return Ok(());
    }

    writer.write_record(columns)?;

    let known: HashSet<&str> = columns.iter().map(String::as_str).collect();
    for (index, record) in records.iter().enumerate() {
        let dropped = record.keys().filter(|key| !known.contains(key)).count();
        if dropped > 0 {
            tracing::debug!("Record {} has {} keys outside the header, dropped", index + 1, dropped);
        }

        let row = columns.iter().map(|col| {
            record
                .get(col)
                .map(|value| value.to_string())
                .unwrap_or_default()
        });
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}
