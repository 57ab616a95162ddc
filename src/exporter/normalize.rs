//! Shape normalization for FatSecret JSON payloads.
//!
//! The service serializes a one-element collection as a bare object and an
//! empty collection as `null` (or omits it). Everything here turns those shapes
//! into plain slices so the fetch loops never branch on them.

use crate::date_codec::parse_service_code;
use crate::errors::{AppError, AppResult};
use serde_json::{Map, Value};

pub type Entry = Map<String, Value>;

/// Coerces a list-or-single-object value into a list of objects.
///
/// `null` yields an empty list. Array items that are not objects are rejected.
pub fn one_or_many(value: &Value) -> AppResult<Vec<&Entry>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Object(entry) => Ok(vec![entry]),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_object().ok_or_else(|| {
                    AppError::MalformedResponse(format!("expected an object, got {item}"))
                })
            })
            .collect(),
        other => Err(AppError::MalformedResponse(format!(
            "expected an object or a list, got {other}"
        ))),
    }
}

/// Extracts the entries of a per-day response such as
/// `{"food_entries": {"food_entry": [...]}}`.
///
/// A `null` or empty wrapper means the day has no entries. A payload without
/// the wrapper key, or a non-empty wrapper without the item key, is malformed.
pub fn day_entries<'a>(
    payload: &'a Value,
    list_key: &str,
    item_key: &str,
) -> AppResult<Vec<&'a Entry>> {
    let root = payload.as_object().ok_or_else(|| {
        AppError::MalformedResponse(format!("expected a JSON object for '{list_key}'"))
    })?;
    match root.get(list_key) {
        None => Err(AppError::MalformedResponse(format!(
            "response has no '{list_key}' field"
        ))),
        Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) if s.is_empty() => Ok(Vec::new()),
        Some(Value::Array(items)) if items.is_empty() => Ok(Vec::new()),
        Some(Value::Object(wrapper)) if wrapper.is_empty() => Ok(Vec::new()),
        Some(Value::Object(wrapper)) => match wrapper.get(item_key) {
            Some(items) => one_or_many(items),
            None => Err(AppError::MalformedResponse(format!(
                "'{list_key}' has no '{item_key}'"
            ))),
        },
        Some(other) => Err(AppError::MalformedResponse(format!(
            "unexpected '{list_key}' value: {other}"
        ))),
    }
}

/// A `weights.get_month` response reduced to what the weight loop needs.
#[derive(Debug)]
pub struct MonthWindow<'a> {
    /// Last day covered by the response, as a day code.
    pub to_date_code: i64,
    /// Daily readings, each still carrying its `date_int`.
    pub days: Vec<&'a Entry>,
}

/// Parses `{"month": {"from_date_int": .., "to_date_int": .., "day": [...]}}`.
pub fn month_window(payload: &Value) -> AppResult<MonthWindow<'_>> {
    let month = payload
        .get("month")
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::MalformedResponse("response has no 'month' object".into()))?;
    let to_date = month.get("to_date_int").ok_or_else(|| {
        AppError::MalformedResponse("month response has no 'to_date_int'".into())
    })?;
    let days = match month.get("day") {
        Some(days) => one_or_many(days)?,
        None => Vec::new(),
    };
    Ok(MonthWindow {
        to_date_code: parse_service_code(to_date)?,
        days,
    })
}
