use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::schema::ColumnType;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// `INTEGER` columns are 32-bit, so wider values stay out of this type.
pub fn parses_as_integer(value: &str) -> bool {
    value.parse::<i32>().is_ok()
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn parses_as_timestamp(value: &str) -> bool {
    parse_timestamp(value).is_some()
}

pub fn parses_as_boolean(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

/// Classify a first observed value. Integer wins over timestamp, which wins over boolean.
pub fn classify_value(value: &str) -> ColumnType {
    if parses_as_integer(value) {
        ColumnType::Integer
    } else if parses_as_timestamp(value) {
        ColumnType::Timestamp
    } else if parses_as_boolean(value) {
        ColumnType::Boolean
    } else {
        ColumnType::Text
    }
}

pub fn conforms_to(value: &str, ty: ColumnType) -> bool {
    match ty {
        ColumnType::Integer => parses_as_integer(value),
        ColumnType::Timestamp => parses_as_timestamp(value),
        ColumnType::Boolean => parses_as_boolean(value),
        ColumnType::Text => true,
    }
}
