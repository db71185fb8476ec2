pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{AttendanceArgs, Json2CsvArgs};

pub use crate::app::pipelines::{AttendancePipeline, Json2CsvPipeline};
pub use crate::config::{AttendanceOptions, Json2CsvOptions};
pub use crate::core::engine::ToolEngine;
pub use crate::domain::ports::{Clock, FixedClock, SystemClock};
pub use crate::utils::error::{Result, ToolError};
