//! Common test utilities for integration tests

use async_trait::async_trait;
use chrono::NaiveDate;
use fatsecret_export::client::DiaryApi;
use fatsecret_export::errors::{AppError, AppResult};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

/// Remote operation recorded by [`FakeDiary`].
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Food,
    Exercise,
    WeightMonth,
}

/// In-memory [`DiaryApi`] returning canned payloads and recording every call.
///
/// Days without a canned food or exercise payload answer with an empty day.
/// Unknown weight months and days listed in `failing` answer with an error.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeDiary {
    responses: HashMap<(Op, i64), Value>,
    failing: Vec<(Op, i64)>,
    calls: Mutex<Vec<(Op, i64)>>,
}

#[allow(dead_code)]
impl FakeDiary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, op: Op, code: i64, payload: Value) -> Self {
        self.responses.insert((op, code), payload);
        self
    }

    pub fn failing_on(mut self, op: Op, code: i64) -> Self {
        self.failing.push((op, code));
        self
    }

    pub fn calls(&self) -> Vec<(Op, i64)> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, op: Op, code: i64) -> AppResult<Value> {
        self.calls.lock().unwrap().push((op, code));
        if self.failing.contains(&(op, code)) {
            return Err(AppError::NetworkError(format!("HTTP 503: {op:?} {code}")));
        }
        if let Some(payload) = self.responses.get(&(op, code)) {
            return Ok(payload.clone());
        }
        match op {
            Op::Food => Ok(json!({ "food_entries": null })),
            Op::Exercise => Ok(json!({ "exercise_entries": null })),
            Op::WeightMonth => Err(AppError::ApiError {
                code: 106,
                message: format!("no canned month for {code}"),
            }),
        }
    }
}

#[async_trait]
impl DiaryApi for FakeDiary {
    async fn food_entries(&self, date_code: i64) -> AppResult<Value> {
        self.answer(Op::Food, date_code)
    }

    async fn exercise_entries(&self, date_code: i64) -> AppResult<Value> {
        self.answer(Op::Exercise, date_code)
    }

    async fn weight_month(&self, date_code: i64) -> AppResult<Value> {
        self.answer(Op::WeightMonth, date_code)
    }
}

#[allow(dead_code)]
pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Helper function to write a config file pointing at `api_url`
#[allow(dead_code)]
pub fn write_config(path: &Path, api_url: &str, datastore: &Path) {
    let contents = format!(
        r#"
[consumer]
key = "consumer-key"
secret = "consumer-secret"

[user]
name = "fatsecret_username"
datastore = "{}"

[export]
delay_ms = 0
api_url = "{api_url}"
"#,
        datastore.display()
    );
    fs::write(path, contents).unwrap();
}

/// Food entry as the service returns it for 2023-01-01 (day code 19358)
#[allow(dead_code)]
pub fn sample_food_entry(id: &str, name: &str) -> Value {
    json!({
        "food_entry_id": id,
        "food_entry_description": format!("1 serving {name}"),
        "food_entry_name": name,
        "date_int": "19358",
        "meal": "Breakfast",
        "food_id": "33691",
        "serving_id": "34321",
        "number_of_units": "1.000",
        "calories": "95",
        "carbohydrate": "25.13",
        "protein": "0.47",
        "fat": "0.31",
        "fiber": "4.4",
        "sugar": "18.91",
        "sodium": "2"
    })
}
