use crate::config::Json2CsvOptions;
use crate::core::json2csv;
use crate::domain::model::GenericRecord;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CsvTable {
    pub columns: Vec<String>,
    pub records: Vec<GenericRecord>,
}

/// Flattens a JSON array of objects into CSV.
pub struct Json2CsvPipeline {
    input: PathBuf,
    columns: Option<Vec<String>>,
}

impl Json2CsvPipeline {
    pub fn new(options: &Json2CsvOptions) -> Self {
        Self {
            input: options.input.clone(),
            columns: options.columns.clone(),
        }
    }
}

impl Pipeline for Json2CsvPipeline {
    type Extracted = Vec<GenericRecord>;
    type Transformed = CsvTable;

    fn extract(&self) -> Result<Vec<GenericRecord>> {
        json2csv::load_generic_records(&self.input)
    }

    fn transform(&self, records: Vec<GenericRecord>) -> Result<CsvTable> {
        let columns = json2csv::resolve_columns(&records, self.columns.as_deref());
        tracing::debug!(
            "Resolved {} columns for {} records",
            columns.len(),
            records.len()
        );
        Ok(CsvTable { columns, records })
    }

    fn load(&self, table: CsvTable, out: &mut dyn Write) -> Result<()> {
        json2csv::write_csv(out, &table.columns, &table.records)
    }
}
