use crate::domain::model::{ComplianceStatus, ComplianceSummary, YearMonth};
use chrono::{Datelike, NaiveDate, Weekday};

pub const DEFAULT_COMPLIANCE_THRESHOLD: f64 = 0.5;

fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn business_days_between(first: NaiveDate, last: NaiveDate) -> u32 {
    first
        .iter_days()
        .take_while(|date| *date <= last)
        .filter(|date| is_business_day(*date))
        .count() as u32
}

/// Monday to Friday days in `month`.
pub fn business_days_in_month(month: YearMonth) -> u32 {
    business_days_between(month.first_day(), month.last_day())
}

/// Business days of `month` up to and including `today`.
pub fn business_days_up_to(month: YearMonth, today: NaiveDate) -> u32 {
    if today < month.first_day() {
        return 0;
    }
    business_days_between(month.first_day(), today.min(month.last_day()))
}

fn required_days(days: u32, threshold: f64) -> u32 {
    (days as f64 * threshold).ceil() as u32
}

pub fn evaluate_compliance(
    office_days: u32,
    elapsed_business_days: u32,
    business_days: u32,
    threshold: f64,
) -> ComplianceSummary {
    let required_total = required_days(business_days, threshold);
    let required_rolling = required_days(elapsed_business_days, threshold);
    let remaining = business_days.saturating_sub(elapsed_business_days);
    let max_possible = office_days + remaining;

    let status = if office_days >= required_total {
        ComplianceStatus::Secured
    } else if office_days >= required_rolling {
        ComplianceStatus::Compliant
    } else if max_possible < required_total {
        ComplianceStatus::Critical
    } else {
        ComplianceStatus::Warning
    };

    ComplianceSummary {
        business_days,
        elapsed_business_days,
        required_office_days: required_total,
        status,
    }
}

pub fn summarize(
    office_days: u32,
    month: YearMonth,
    today: NaiveDate,
    threshold: f64,
) -> ComplianceSummary {
    evaluate_compliance(
        office_days,
        business_days_up_to(month, today),
        business_days_in_month(month),
        threshold,
    )
}
