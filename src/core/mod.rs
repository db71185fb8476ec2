pub mod attendance_loader;
pub mod compliance;
pub mod engine;
pub mod json2csv;
pub mod office_days;

pub use crate::domain::model::{AttendanceRecord, FieldValue, GenericRecord, YearMonth};
pub use crate::domain::ports::{Clock, Pipeline};
pub use crate::utils::error::Result;
