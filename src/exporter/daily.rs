use super::normalize::day_entries;
use super::throttle::Throttle;
use crate::client::DiaryApi;
use crate::constants::DATE_INT_FIELD;
use crate::date_codec::to_service_code;
use crate::errors::AppResult;
use crate::models::{DateRange, Record};
use serde_json::Value;
use tracing::debug;

/// Diary kinds served by a per-day remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Daily {
    Food,
    Exercise,
}

impl Daily {
    fn list_key(self) -> &'static str {
        match self {
            Self::Food => "food_entries",
            Self::Exercise => "exercise_entries",
        }
    }

    fn item_key(self) -> &'static str {
        match self {
            Self::Food => "food_entry",
            Self::Exercise => "exercise_entry",
        }
    }

    /// Raw field removed from each entry. Exercise entries only get the date substitution.
    fn drop_field(self) -> Option<&'static str> {
        match self {
            Self::Food => Some(DATE_INT_FIELD),
            Self::Exercise => None,
        }
    }

    async fn call<A: DiaryApi + ?Sized>(self, api: &A, date_code: i64) -> AppResult<Value> {
        match self {
            Self::Food => api.food_entries(date_code).await,
            Self::Exercise => api.exercise_entries(date_code).await,
        }
    }
}

/// Calls the per-day operation for every day of `range`, in order, pausing after each call.
pub(super) async fn fetch_daily<A: DiaryApi + ?Sized>(
    api: &A,
    range: DateRange,
    throttle: Throttle,
    kind: Daily,
) -> AppResult<Vec<Record>> {
    let mut records = Vec::new();

    for day in range.days() {
        let payload = kind.call(api, to_service_code(day)).await?;

        let entries = day_entries(&payload, kind.list_key(), kind.item_key())?;
        debug!(day = %day, entries = entries.len(), "Fetched day");
        records.extend(
            entries
                .into_iter()
                .map(|entry| Record::from_entry(entry, day, kind.drop_field())),
        );

        throttle.pause().await;
    }

    Ok(records)
}
