use crate::domain::model::{AttendanceRecord, YearMonth};
use crate::domain::ports::Clock;
use crate::utils::error::{Result, ToolError};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static MONTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("month pattern compiles"));

const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `yyyy-MM` month argument.
pub fn parse_month(value: &str) -> Result<YearMonth> {
    let caps = MONTH_PATTERN
        .captures(value)
        .ok_or_else(|| ToolError::invalid_month(value, "expected format yyyy-MM"))?;

    let year: i32 = caps[1]
        .parse()
        .map_err(|_| ToolError::invalid_month(value, "year out of range"))?;
    let month: u32 = caps[2]
        .parse()
        .map_err(|_| ToolError::invalid_month(value, "month out of range"))?;

    YearMonth::new(year, month).ok_or_else(|| ToolError::invalid_month(value, "month out of range"))
}

/// Target month from the argument, or the clock's current month.
pub fn resolve_month(argument: Option<&str>, clock: &dyn Clock) -> Result<YearMonth> {
    match argument {
        Some(value) => parse_month(value),
        None => Ok(YearMonth::of(clock.today())),
    }
}

pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, RECORD_DATE_FORMAT).ok()
}

/// Records dated inside `month`, in load order. Records whose date cannot
/// be parsed are logged and left out.
pub fn records_in_month(records: &[AttendanceRecord], month: YearMonth) -> Vec<&AttendanceRecord> {
    records
        .iter()
        .filter(|record| match parse_record_date(&record.date) {
            Some(date) => month.contains(date),
            None => {
                tracing::warn!("Warning: Error parsing date {}", record.date);
                false
            }
        })
        .collect()
}

/// Office days in `month`. The day-off flag does not affect the count.
pub fn count_office_days(records: &[AttendanceRecord], month: YearMonth) -> u32 {
    let count = records_in_month(records, month)
        .into_iter()
        .filter(|record| record.is_office)
        .count();
    count as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixedClock;

    fn march() -> YearMonth {
        YearMonth::new(2024, 3).unwrap()
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-03").unwrap(), march());
        assert_eq!(parse_month("1999-12").unwrap(), YearMonth::new(1999, 12).unwrap());

        for bad in ["2024-13", "2024-00", "January", "2024-3", "2024-03-01", "24-03", ""] {
            let err = parse_month(bad).unwrap_err();
            assert!(
                matches!(err, ToolError::InvalidArgument { .. }),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_resolve_month_defaults_to_clock() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 7, 19).unwrap());

        assert_eq!(
            resolve_month(None, &clock).unwrap(),
            YearMonth::new(2025, 7).unwrap()
        );
        assert_eq!(resolve_month(Some("2024-03"), &clock).unwrap(), march());
        assert!(resolve_month(Some("2024/03"), &clock).is_err());
    }

    #[test]
    fn test_count_office_days_in_month() {
        let records = vec![
            AttendanceRecord::new("2024-03-01", true, false),
            AttendanceRecord::new("2024-03-04", false, false),
            AttendanceRecord::new("2024-03-05", true, true),
            AttendanceRecord::new("2024-02-29", true, false),
            AttendanceRecord::new("2023-03-06", true, false),
            AttendanceRecord::new("garbage", true, false),
            AttendanceRecord::new("2024-03-31", true, false),
        ];

        // 休假旗標不影響計數
        assert_eq!(count_office_days(&records, march()), 3);
        assert_eq!(records_in_month(&records, march()).len(), 4);
        assert_eq!(count_office_days(&records, YearMonth::new(2024, 4).unwrap()), 0);
    }

    #[test]
    fn test_count_office_days_empty() {
        assert_eq!(count_office_days(&[], march()), 0);
    }
}
