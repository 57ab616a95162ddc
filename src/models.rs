use crate::constants::*;
use crate::date_codec::format_date;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Kind of diary data to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Food,
    Exercise,
    Weight,
}

impl DataKind {
    /// Returns a human-readable name for the data kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Exercise => "Exercise",
            Self::Weight => "Weight",
        }
    }

    /// Returns the fixed, ordered output columns for the data kind.
    pub fn schema(&self) -> &'static [&'static str] {
        match self {
            Self::Food => FOOD_FIELDS,
            Self::Exercise => EXERCISE_FIELDS,
            Self::Weight => WEIGHT_FIELDS,
        }
    }
}

impl FromStr for DataKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().to_lowercase();

        if FOOD_ALIASES.contains(&lower.as_str()) {
            Ok(Self::Food)
        } else if EXERCISE_ALIASES.contains(&lower.as_str()) {
            Ok(Self::Exercise)
        } else if WEIGHT_ALIASES.contains(&lower.as_str()) {
            Ok(Self::Weight)
        } else {
            Err(AppError::InvalidDataKind(value.to_string()))
        }
    }
}

/// Inclusive range of calendar dates with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range from two dates, swapping them if given in reverse order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day of the range, in chronological order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Number of days covered, both ends included.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// One exported row: field name to cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Builds a record from a raw service object.
    ///
    /// Every field of `entry` is copied except `drop_field`, then `date` is set to `date`.
    /// Nested objects and arrays are kept as their JSON text.
    pub fn from_entry(
        entry: &Map<String, Value>,
        date: NaiveDate,
        drop_field: Option<&str>,
    ) -> Self {
        let mut fields: BTreeMap<String, String> = entry
            .iter()
            .filter(|(name, _)| Some(name.as_str()) != drop_field)
            .map(|(name, value)| (name.clone(), cell_text(value)))
            .collect();
        fields.insert(DATE_FIELD.to_string(), format_date(date));
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Projects the record onto `schema`; missing fields become empty cells.
    pub fn project<'a>(&'a self, schema: &'a [&'a str]) -> impl Iterator<Item = &'a str> + 'a {
        schema.iter().map(move |field| self.get(field).unwrap_or(""))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parses a data kind argument, mapping unknown values to `InvalidDataKind`.
pub fn parse_data_kind(value: &str) -> AppResult<DataKind> {
    value.parse()
}
