use chrono::{Datelike, NaiveDate};
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// One attendance entry as stored by the tracker.
///
/// `date` is kept verbatim; it is parsed only when records are filtered by
/// month so a bad date drops a single record instead of the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub date: String,
    pub is_office: bool,
    pub is_day_off: bool,
}

impl AttendanceRecord {
    pub fn new(date: impl Into<String>, is_office: bool, is_day_off: bool) -> Self {
        Self {
            date: date.into(),
            is_office,
            is_day_off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttendanceField {
    Date,
    IsOffice,
    IsDayOff,
    Other,
}

impl AttendanceField {
    /// Keys match case-insensitively, with or without underscores.
    fn from_key(key: &str) -> Self {
        let normalized: String = key.chars().filter(|c| *c != '_').collect();
        if normalized.eq_ignore_ascii_case("date") {
            AttendanceField::Date
        } else if normalized.eq_ignore_ascii_case("isoffice") {
            AttendanceField::IsOffice
        } else if normalized.eq_ignore_ascii_case("isdayoff") {
            AttendanceField::IsDayOff
        } else {
            AttendanceField::Other
        }
    }
}

// 缺少的欄位取預設值；沒有日期的紀錄會在月份篩選時被警告並略過
impl<'de> Deserialize<'de> for AttendanceRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttendanceVisitor;

        impl<'de> Visitor<'de> for AttendanceVisitor {
            type Value = AttendanceRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an attendance object")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<AttendanceRecord, E> {
                Ok(AttendanceRecord::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<AttendanceRecord, A::Error> {
                let mut record = AttendanceRecord::default();
                while let Some(key) = map.next_key::<String>()? {
                    match AttendanceField::from_key(&key) {
                        AttendanceField::Date => {
                            if let Some(date) = map.next_value::<Option<String>>()? {
                                record.date = date;
                            }
                        }
                        AttendanceField::IsOffice => {
                            if let Some(flag) = map.next_value::<Option<bool>>()? {
                                record.is_office = flag;
                            }
                        }
                        AttendanceField::IsDayOff => {
                            if let Some(flag) = map.next_value::<Option<bool>>()? {
                                record.is_day_off = flag;
                            }
                        }
                        AttendanceField::Other => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(record)
            }
        }

        deserializer.deserialize_any(AttendanceVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// `month` must be in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Scalar cell value of a converted JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => FieldValue::String(s),
            serde_json::Value::Number(n) => FieldValue::Number(n),
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Null => FieldValue::Null,
            // 巢狀結構以精簡 JSON 文字輸出
            nested => FieldValue::String(nested.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => Ok(()),
        }
    }
}

/// A JSON object with its keys kept in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericRecord {
    fields: Vec<(String, FieldValue)>,
}

impl GenericRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing an earlier value in place so the first
    /// position of a duplicated key wins.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for GenericRecord {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        let mut record = GenericRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl<'de> Deserialize<'de> for GenericRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = GenericRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<GenericRecord, E> {
                Ok(GenericRecord::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<GenericRecord, A::Error> {
                let mut record = GenericRecord::new();
                while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
                    record.insert(key, FieldValue::from(value));
                }
                Ok(record)
            }
        }

        deserializer.deserialize_any(RecordVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceStatus {
    /// The whole month's requirement is already met.
    Secured,
    /// On track for the business days elapsed so far.
    Compliant,
    /// Behind, but the requirement can still be reached.
    Warning,
    /// The requirement can no longer be reached this month.
    Critical,
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ComplianceStatus::Secured => "secured",
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::Warning => "warning",
            ComplianceStatus::Critical => "critical",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceSummary {
    pub business_days: u32,
    pub elapsed_business_days: u32,
    pub required_office_days: u32,
    pub status: ComplianceStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    pub month: YearMonth,
    pub office_days: u32,
    pub compliance: Option<ComplianceSummary>,
}
