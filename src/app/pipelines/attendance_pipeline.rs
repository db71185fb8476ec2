use crate::config::AttendanceOptions;
use crate::core::compliance;
use crate::core::{attendance_loader, office_days};
use crate::domain::model::{AttendanceRecord, MonthlyReport, YearMonth};
use crate::domain::ports::{Clock, Pipeline};
use crate::utils::error::Result;
use std::io::Write;
use std::path::PathBuf;

/// Counts office days of one month in an attendance file.
pub struct AttendancePipeline<C: Clock> {
    data_file: PathBuf,
    month: YearMonth,
    compliance_threshold: Option<f64>,
    clock: C,
}

impl<C: Clock> AttendancePipeline<C> {
    /// Resolves the target month up front so a bad month argument fails
    /// before any file is read.
    pub fn new(options: &AttendanceOptions, clock: C) -> Result<Self> {
        let month = office_days::resolve_month(options.month.as_deref(), &clock)?;
        tracing::debug!("Counting office days for {}", month);

        Ok(Self {
            data_file: options.data_file.clone(),
            month,
            compliance_threshold: options.summary.then_some(options.compliance_threshold),
            clock,
        })
    }

}

impl<C: Clock> Pipeline for AttendancePipeline<C> {
    type Extracted = Vec<AttendanceRecord>;
    type Transformed = MonthlyReport;

    fn extract(&self) -> Result<Vec<AttendanceRecord>> {
        attendance_loader::load_attendance(&self.data_file)
    }

    fn transform(&self, records: Vec<AttendanceRecord>) -> Result<MonthlyReport> {
        let office_days = office_days::count_office_days(&records, self.month);

        let compliance = self.compliance_threshold.map(|threshold| {
            compliance::summarize(office_days, self.month, self.clock.today(), threshold)
        });

        Ok(MonthlyReport {
            month: self.month,
            office_days,
            compliance,
        })
    }

    fn load(&self, report: MonthlyReport, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", report.office_days)?;

        if let Some(summary) = &report.compliance {
            writeln!(out, "month: {}", report.month)?;
            writeln!(out, "business days: {}", summary.business_days)?;
            writeln!(out, "elapsed business days: {}", summary.elapsed_business_days)?;
            writeln!(out, "required: {}", summary.required_office_days)?;
            writeln!(out, "status: {}", summary.status)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::ToolEngine;
    use crate::domain::ports::FixedClock;
    use crate::utils::error::ToolError;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap())
    }

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn json_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn run(options: &AttendanceOptions) -> Result<String> {
        let engine = ToolEngine::new(AttendancePipeline::new(options, clock())?);
        let mut out = Vec::new();
        engine.run(&mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    const DATA: &str = "Date,IsOffice,IsDayOff\n\
                        2024-03-04,true,false\n\
                        2024-03-05,false,false\n\
                        2024-03-06,true,false\n\
                        2024-02-28,true,false\n";

    #[test]
    fn test_defaults_to_clock_month() {
        let file = csv_file(DATA);
        let output = run(&AttendanceOptions::new(file.path())).unwrap();
        assert_eq!(output, "2\n");
    }

    #[test]
    fn test_explicit_month() {
        let file = csv_file(DATA);
        let output = run(&AttendanceOptions::new(file.path()).with_month("2024-02")).unwrap();
        assert_eq!(output, "1\n");
    }

    #[test]
    fn test_json_keys_in_any_case_count() {
        let file = json_file(r#"[{"Date":"2024-03-04","isoffice":true,"isdayoff":false}]"#);
        let output = run(&AttendanceOptions::new(file.path())).unwrap();
        assert_eq!(output, "1\n");
    }

    #[test]
    fn test_json_record_without_date_is_skipped() {
        let file = json_file(r#"[{"IsOffice":true},null,{"Date":"2024-03-05","IsOffice":true}]"#);
        let output = run(&AttendanceOptions::new(file.path())).unwrap();
        assert_eq!(output, "1\n");
    }

    #[test]
    fn test_invalid_month_fails_before_reading() {
        let options = AttendanceOptions::new("missing.csv").with_month("2024-13");
        let err = AttendancePipeline::new(&options, clock()).err().unwrap();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
    }

    #[test]
    fn test_summary_lines() {
        let file = csv_file(DATA);
        let options = AttendanceOptions::new(file.path()).with_summary(0.5);
        let output = run(&options).unwrap();

        // 2024-03-08 為止共 6 個工作天，需 3 天；全月 21 天需 11 天
        assert_eq!(
            output,
            "2\n\
             month: 2024-03\n\
             business days: 21\n\
             elapsed business days: 6\n\
             required: 11\n\
             status: warning\n"
        );
    }
}
