//! Conversion between calendar dates and FatSecret's day-count encoding.
//!
//! The service represents dates as the number of days since 1970-01-01.
//! Both sides are naive calendar dates: no timezone is involved.

use crate::constants::DATE_FORMAT;
use crate::errors::{AppError, AppResult};
use chrono::{Duration, NaiveDate};
use serde_json::Value;

/// Zero point of the service's day-count encoding.
pub fn service_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("1970-01-01 is a valid date")
}

/// Returns the number of whole days between the service epoch and `date`.
pub fn to_service_code(date: NaiveDate) -> i64 {
    date.signed_duration_since(service_epoch()).num_days()
}

/// Returns the calendar date that is `code` days after the service epoch.
///
/// # Errors
///
/// Returns `MalformedResponse` if the resulting date is outside the range chrono can represent.
pub fn from_service_code(code: i64) -> AppResult<NaiveDate> {
    Duration::try_days(code)
        .and_then(|offset| service_epoch().checked_add_signed(offset))
        .ok_or_else(|| {
            AppError::MalformedResponse(format!("day code {code} is out of the supported range"))
        })
}

/// Reads a day code from a JSON value.
///
/// The service emits numbers as strings (`"19358"`), but plain integers are accepted too.
pub fn parse_service_code(value: &Value) -> AppResult<i64> {
    match value {
        Value::String(s) => s.trim().parse::<i64>().map_err(|e| {
            AppError::MalformedResponse(format!("invalid day code '{s}': {e}"))
        }),
        Value::Number(n) => n.as_i64().ok_or_else(|| {
            AppError::MalformedResponse(format!("invalid day code {n}: not an integer"))
        }),
        other => Err(AppError::MalformedResponse(format!(
            "invalid day code {other}: expected a string or integer"
        ))),
    }
}

/// Formats a date the way it appears in the exported `date` column.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` command-line date.
pub fn parse_date(input: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|e| {
        AppError::InvalidInput(format!("Date must be YYYY-MM-DD, got '{input}': {e}"))
    })
}
