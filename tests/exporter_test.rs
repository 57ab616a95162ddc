//! Integration tests for the date-range fetch loops

#[path = "common/mod.rs"]
mod common;

use common::*;
use fatsecret_export::date_codec::to_service_code;
use fatsecret_export::errors::AppError;
use fatsecret_export::exporter::{Exporter, Throttle};
use fatsecret_export::models::{DataKind, DateRange};
use fatsecret_export::writer::write_batch;
use serde_json::json;
use std::time::Duration;

fn weight_day(code: i64, kg: &str) -> serde_json::Value {
    json!({ "date_int": code.to_string(), "weight_kg": kg, "weight_comment": "" })
}

#[tokio::test]
async fn test_food_single_day_two_entries() {
    let day = ymd(2023, 1, 1);
    let api = FakeDiary::new().with_response(
        Op::Food,
        19358,
        json!({ "food_entries": { "food_entry": [
            sample_food_entry("101", "Apple"),
            sample_food_entry("102", "Oatmeal")
        ]}}),
    );

    let batch = Exporter::new(&api, Throttle::Disabled)
        .export(DataKind::Food, DateRange::new(day, day))
        .await
        .unwrap();

    assert_eq!(batch.fields, DataKind::Food.schema());
    assert_eq!(batch.records.len(), 2);
    for record in &batch.records {
        assert_eq!(record.get("date"), Some("2023-01-01"));
        assert!(!record.contains("date_int"));
    }
    assert_eq!(batch.records[0].get("food_entry_name"), Some("Apple"));
    assert_eq!(batch.records[1].get("food_entry_name"), Some("Oatmeal"));

    let mut out = Vec::new();
    write_batch(&mut out, &batch).unwrap();
    let csv = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], DataKind::Food.schema().join(","));
    assert!(lines[1].starts_with("2023-01-01,101,1 serving Apple,Breakfast,"));
    assert!(!csv.contains("19358"));
}

#[tokio::test]
async fn test_food_visits_every_day_once_in_order() {
    let range = DateRange::new(ymd(2023, 2, 27), ymd(2023, 3, 2));
    let api = FakeDiary::new();

    let batch = Exporter::new(&api, Throttle::Disabled)
        .fetch_food(range)
        .await
        .unwrap();

    assert!(batch.records.is_empty());
    let expected: Vec<(Op, i64)> = range
        .days()
        .map(|d| (Op::Food, to_service_code(d)))
        .collect();
    assert_eq!(api.calls(), expected);
    assert_eq!(api.calls().len(), 4);
}

#[tokio::test]
async fn test_food_single_entry_object_and_empty_days() {
    let api = FakeDiary::new()
        .with_response(
            Op::Food,
            19358,
            json!({ "food_entries": { "food_entry": sample_food_entry("1", "Apple") } }),
        )
        .with_response(Op::Food, 19359, json!({ "food_entries": {} }))
        .with_response(
            Op::Food,
            19360,
            json!({ "food_entries": { "food_entry": [sample_food_entry("2", "Pear")] } }),
        );

    let batch = Exporter::new(&api, Throttle::Disabled)
        .fetch_food(DateRange::new(ymd(2023, 1, 1), ymd(2023, 1, 3)))
        .await
        .unwrap();

    let dates: Vec<&str> = batch
        .records
        .iter()
        .filter_map(|r| r.get("date"))
        .collect();
    assert_eq!(dates, vec!["2023-01-01", "2023-01-03"]);
}

#[tokio::test]
async fn test_exercise_keeps_raw_fields_and_sets_date() {
    let api = FakeDiary::new().with_response(
        Op::Exercise,
        19358,
        json!({ "exercise_entries": { "exercise_entry": [
            { "exercise_id": "1", "exercise_name": "Sleeping", "minutes": "480",
              "calories": "520", "is_template_value": "true", "date_int": "19358" },
            { "exercise_id": "2", "exercise_name": "Running", "minutes": "30",
              "calories": "310", "is_template_value": "false" }
        ]}}),
    );

    let batch = Exporter::new(&api, Throttle::Disabled)
        .export(DataKind::Exercise, DateRange::new(ymd(2023, 1, 1), ymd(2023, 1, 2)))
        .await
        .unwrap();

    assert_eq!(
        batch.fields,
        &["date", "exercise_id", "exercise_name", "minutes", "calories", "is_template_value"]
    );
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.records[1].get("date"), Some("2023-01-01"));
    assert_eq!(batch.records[0].get("date_int"), Some("19358"));
    assert_eq!(
        api.calls(),
        vec![(Op::Exercise, 19358), (Op::Exercise, 19359)]
    );
}

#[tokio::test]
async fn test_remote_failure_aborts_export() {
    let api = FakeDiary::new()
        .with_response(
            Op::Food,
            19358,
            json!({ "food_entries": { "food_entry": sample_food_entry("1", "Apple") } }),
        )
        .failing_on(Op::Food, 19359);

    let result = Exporter::new(&api, Throttle::Disabled)
        .export(DataKind::Food, DateRange::new(ymd(2023, 1, 1), ymd(2023, 1, 5)))
        .await;

    assert!(matches!(result, Err(AppError::NetworkError(_))));
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn test_malformed_day_payload_is_an_error() {
    let api = FakeDiary::new().with_response(Op::Food, 19358, json!({ "unexpected": true }));
    let result = Exporter::new(&api, Throttle::Disabled)
        .fetch_food(DateRange::new(ymd(2023, 1, 1), ymd(2023, 1, 1)))
        .await;
    assert!(matches!(result, Err(AppError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_food_wrapper_without_entry_key_is_an_error() {
    let api = FakeDiary::new().with_response(
        Op::Food,
        19358,
        json!({ "food_entries": { "unexpected_key": sample_food_entry("1", "Apple") } }),
    );
    let result = Exporter::new(&api, Throttle::Disabled)
        .fetch_food(DateRange::new(ymd(2023, 1, 1), ymd(2023, 1, 1)))
        .await;
    assert!(matches!(result, Err(AppError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_weight_spans_two_remote_months() {
    // 2023-01-30 = 19387, 2023-01-31 = 19388, 2023-02-01 = 19389, 2023-02-28 = 19416
    let api = FakeDiary::new()
        .with_response(
            Op::WeightMonth,
            19387,
            json!({ "month": {
                "from_date_int": "19358",
                "to_date_int": "19388",
                "day": [
                    weight_day(19358, "81.0"),
                    weight_day(19386, "80.6"),
                    weight_day(19387, "80.4"),
                    weight_day(19388, "80.3")
                ]
            }}),
        )
        .with_response(
            Op::WeightMonth,
            19389,
            json!({ "month": {
                "from_date_int": "19389",
                "to_date_int": "19416",
                "day": [
                    weight_day(19389, "80.2"),
                    weight_day(19390, "80.0"),
                    weight_day(19391, "79.9")
                ]
            }}),
        );

    let batch = Exporter::new(&api, Throttle::Disabled)
        .export(DataKind::Weight, DateRange::new(ymd(2023, 2, 2), ymd(2023, 1, 30)))
        .await
        .unwrap();

    assert_eq!(
        api.calls(),
        vec![(Op::WeightMonth, 19387), (Op::WeightMonth, 19389)]
    );
    let rows: Vec<(&str, &str)> = batch
        .records
        .iter()
        .map(|r| (r.get("date").unwrap(), r.get("weight_kg").unwrap()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("2023-01-30", "80.4"),
            ("2023-01-31", "80.3"),
            ("2023-02-01", "80.2"),
            ("2023-02-02", "80.0"),
        ]
    );
    assert!(batch.records.iter().all(|r| !r.contains("date_int")));
    assert_eq!(batch.fields, &["date", "weight_kg"]);
}

#[tokio::test]
async fn test_weight_single_day_object_is_normalized() {
    let api = FakeDiary::new().with_response(
        Op::WeightMonth,
        19358,
        json!({ "month": {
            "from_date_int": "19358",
            "to_date_int": "19388",
            "day": weight_day(19360, "82.5")
        }}),
    );

    let batch = Exporter::new(&api, Throttle::Disabled)
        .fetch_weight(DateRange::new(ymd(2023, 1, 1), ymd(2023, 1, 31)))
        .await
        .unwrap();

    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.records[0].get("date"), Some("2023-01-03"));
    assert_eq!(batch.records[0].get("weight_kg"), Some("82.5"));
}

#[tokio::test]
async fn test_weight_month_without_days_yields_nothing() {
    let api = FakeDiary::new().with_response(
        Op::WeightMonth,
        19358,
        json!({ "month": { "from_date_int": "19358", "to_date_int": "19388" } }),
    );

    let batch = Exporter::new(&api, Throttle::Disabled)
        .fetch_weight(DateRange::new(ymd(2023, 1, 1), ymd(2023, 1, 10)))
        .await
        .unwrap();

    assert!(batch.records.is_empty());
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn test_weight_window_that_does_not_advance_is_rejected() {
    // Window ends before the requested day: advancing would revisit the same day forever.
    let api = FakeDiary::new().with_response(
        Op::WeightMonth,
        19387,
        json!({ "month": { "from_date_int": "19358", "to_date_int": "19380" } }),
    );

    let result = Exporter::new(&api, Throttle::Disabled)
        .fetch_weight(DateRange::new(ymd(2023, 1, 30), ymd(2023, 2, 2)))
        .await;

    assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_throttle_pauses_after_each_call() {
    let api = FakeDiary::new();
    let start = tokio::time::Instant::now();

    Exporter::new(&api, Throttle::Fixed(Duration::from_secs(1)))
        .fetch_exercises(DateRange::new(ymd(2023, 1, 1), ymd(2023, 1, 3)))
        .await
        .unwrap();

    assert_eq!(api.calls().len(), 3);
    assert!(start.elapsed() >= Duration::from_secs(3));
}
