pub mod attendance_pipeline;
pub mod json2csv_pipeline;

pub use attendance_pipeline::AttendancePipeline;
pub use json2csv_pipeline::{CsvTable, Json2CsvPipeline};
